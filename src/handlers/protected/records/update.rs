use axum::extract::State;
use axum::Extension;
use serde_json::Value;

use crate::app::AppState;
use crate::auth::Identity;
use crate::database::Entity;
use crate::error::{ApiError, ApiResult};
use crate::handlers::db_error;
use crate::middleware::{response::message, ApiResponse, JsonBody};

use super::{record_from_update, RecordId};

/// PUT /api/{entity}s/:id - overwrite every non-key column
pub async fn update(
    State(state): State<AppState>,
    Extension(entity): Extension<Entity>,
    Extension(identity): Extension<Identity>,
    RecordId(id): RecordId,
    JsonBody(body): JsonBody,
) -> ApiResult<ApiResponse<Value>> {
    let record = record_from_update(entity, id, &body)?;

    let route = format!("PUT {}/:id", entity.collection_path());
    let affected = state.store.update(&record).await.map_err(db_error(&route))?;
    if affected == 0 {
        return Err(ApiError::not_found(entity.not_found()));
    }

    tracing::info!("{} {} updated by {}", entity.label(), id, identity.email);
    Ok(ApiResponse::success(message(&format!("{} updated", entity.label()))))
}
