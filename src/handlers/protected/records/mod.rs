// handlers/protected/records/mod.rs - CRUD for Owner, Pet and Appointment
//
// One set of handlers serves all three entities; the route table attaches the
// `Entity` as a request extension.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::create;
pub use delete::delete;
pub use get::get;
pub use list::list;
pub use update::update;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde_json::Value;

use crate::database::models::{Appointment, Entity, Owner, Pet, Record};
use crate::error::ApiError;
use crate::validation::parse_int;

/// Path id or 400 `Invalid <pk>`
pub(crate) fn path_id(entity: Entity, raw: &str) -> Result<i64, ApiError> {
    parse_int(raw).ok_or_else(|| ApiError::bad_request(entity.invalid_id()))
}

/// The `:id` segment of an item route, parsed for the entity the route serves.
/// Undecodable segments are rejected like non-integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(entity) = parts.extensions.get::<Entity>().copied() else {
            tracing::error!("Item route is missing its entity extension");
            return Err(ApiError::internal_server_error(ApiError::INTERNAL_ERROR));
        };

        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => path_id(entity, &raw).map(RecordId),
            Err(rejection) => {
                tracing::debug!("Rejected {} path segment: {}", entity.primary_key(), rejection.body_text());
                Err(ApiError::bad_request(entity.invalid_id()))
            }
        }
    }
}

pub(crate) fn record_from_create(entity: Entity, body: &Value) -> Result<Record, ApiError> {
    let record = match entity {
        Entity::Owner => Owner::from_create(body)?.into(),
        Entity::Pet => Pet::from_create(body)?.into(),
        Entity::Appointment => Appointment::from_create(body)?.into(),
    };
    Ok(record)
}

pub(crate) fn record_from_update(entity: Entity, id: i64, body: &Value) -> Result<Record, ApiError> {
    let record = match entity {
        Entity::Owner => Owner::from_update(id, body)?.into(),
        Entity::Pet => Pet::from_update(id, body)?.into(),
        Entity::Appointment => Appointment::from_update(id, body)?.into(),
    };
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_ids_follow_integer_rules() {
        assert_eq!(path_id(Entity::Owner, "42").unwrap(), 42);
        assert_eq!(path_id(Entity::Owner, "-1").unwrap(), -1);
        assert_eq!(
            path_id(Entity::Pet, "abc").unwrap_err(),
            ApiError::bad_request("Invalid pet_id")
        );
        assert!(path_id(Entity::Appointment, "1.5").is_err());
    }

    #[test]
    fn validation_messages_become_bad_requests() {
        let err = record_from_create(Entity::Pet, &json!({})).unwrap_err();
        assert_eq!(err, ApiError::bad_request("pet_id and owner_id must be integers"));
    }
}
