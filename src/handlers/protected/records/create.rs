use axum::extract::State;
use axum::Extension;
use serde_json::Value;

use crate::app::AppState;
use crate::auth::Identity;
use crate::database::Entity;
use crate::error::ApiResult;
use crate::handlers::db_error;
use crate::middleware::{response::message, ApiResponse, JsonBody};

use super::record_from_create;

/**
 * POST /api/{entity}s - Insert a row with a caller-supplied primary key
 *
 * Checks run in order: key types, required fields, email format. The first
 * failure is returned as 400 and nothing is written.
 *
 * Expected Output (Success, 201):
 * ```json
 * { "message": "Owner created", "owner_id": 12 }
 * ```
 */
pub async fn create(
    State(state): State<AppState>,
    Extension(entity): Extension<Entity>,
    Extension(identity): Extension<Identity>,
    JsonBody(body): JsonBody,
) -> ApiResult<ApiResponse<Value>> {
    let record = record_from_create(entity, &body)?;

    let route = format!("POST {}", entity.collection_path());
    state.store.insert(&record).await.map_err(db_error(&route))?;
    tracing::info!("{} {} created by {}", entity.label(), record.id(), identity.email);

    let mut payload = message(&format!("{} created", entity.label()));
    payload[entity.primary_key()] = Value::from(record.id());
    Ok(ApiResponse::created(payload))
}
