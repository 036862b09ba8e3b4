use axum::extract::State;
use axum::Extension;
use serde_json::Value;

use crate::app::AppState;
use crate::auth::Identity;
use crate::database::Entity;
use crate::error::{ApiError, ApiResult};
use crate::handlers::db_error;
use crate::middleware::{response::message, ApiResponse};

use super::RecordId;

/// DELETE /api/{entity}s/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(entity): Extension<Entity>,
    Extension(identity): Extension<Identity>,
    RecordId(id): RecordId,
) -> ApiResult<ApiResponse<Value>> {

    let route = format!("DELETE {}/:id", entity.collection_path());
    let affected = state.store.delete(entity, id).await.map_err(db_error(&route))?;
    if affected == 0 {
        return Err(ApiError::not_found(entity.not_found()));
    }

    tracing::info!("{} {} deleted by {}", entity.label(), id, identity.email);
    Ok(ApiResponse::success(message(&format!("{} deleted", entity.label()))))
}
