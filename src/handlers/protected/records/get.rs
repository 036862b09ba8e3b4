use axum::extract::State;
use axum::Extension;

use crate::app::AppState;
use crate::database::Entity;
use crate::error::{ApiError, ApiResult};
use crate::handlers::db_error;
use crate::middleware::ApiResponse;
use crate::types::Row;

use super::RecordId;

/// GET /api/{entity}s/:id - one row or 404
pub async fn get(
    State(state): State<AppState>,
    Extension(entity): Extension<Entity>,
    RecordId(id): RecordId,
) -> ApiResult<ApiResponse<Row>> {

    let route = format!("GET {}/:id", entity.collection_path());
    let row = state
        .store
        .select_by_id(entity, id)
        .await
        .map_err(db_error(&route))?
        .ok_or_else(|| ApiError::not_found(entity.not_found()))?;

    Ok(ApiResponse::success(row))
}
