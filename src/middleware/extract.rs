use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub const INVALID_QUERY: &str = "Invalid query string";

/// Query string deserialized into `T`. Rejections use the JSON error envelope.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => {
                tracing::debug!("Rejected query string: {}", rejection.body_text());
                Err(ApiError::bad_request(INVALID_QUERY))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::AppointmentSearchQuery;

    async fn extract(uri: &str) -> Result<AppointmentSearchQuery, ApiError> {
        let (mut parts, _) = axum::http::Request::builder().uri(uri).body(()).unwrap().into_parts();
        QueryParams::<AppointmentSearchQuery>::from_request_parts(&mut parts, &())
            .await
            .map(|q| q.0)
    }

    #[tokio::test]
    async fn well_formed_query_passes() {
        let query = extract("/api/appointments/search?status=done&from=2024-01-01").await.unwrap();
        assert_eq!(query.status.as_deref(), Some("done"));
        assert_eq!(query.from.as_deref(), Some("2024-01-01"));
        assert_eq!(query.to, None);
    }

    #[tokio::test]
    async fn repeated_field_is_an_enveloped_bad_request() {
        let err = extract("/api/appointments/search?status=a&status=b").await.unwrap_err();
        assert_eq!(err, ApiError::bad_request("Invalid query string"));
    }
}
