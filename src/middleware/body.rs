use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const INVALID_JSON: &str = "Invalid JSON body";

/// Request body as loose JSON.
///
/// Bodies without a JSON content type, and empty bodies, read as `{}` so the
/// field validators report what is missing. A JSON body must be an object or an
/// array; anything else is rejected with 400.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

#[axum::async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Failed to read request body: {}", e);
            ApiError::bad_request(INVALID_JSON)
        })?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => Ok(JsonBody(value)),
            Ok(_) => Err(ApiError::bad_request(INVALID_JSON)),
            Err(e) => {
                tracing::debug!("Rejected malformed JSON body: {}", e);
                Err(ApiError::bad_request(INVALID_JSON))
            }
        }
    }
}

fn json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}
