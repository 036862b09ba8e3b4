use axum::extract::State;
use axum::Extension;

use crate::app::AppState;
use crate::database::Entity;
use crate::error::ApiResult;
use crate::handlers::db_error;
use crate::middleware::ApiResponse;
use crate::types::Row;

/// GET /api/{entity}s - every row, unfiltered
pub async fn list(
    State(state): State<AppState>,
    Extension(entity): Extension<Entity>,
) -> ApiResult<ApiResponse<Vec<Row>>> {
    let route = format!("GET {}", entity.collection_path());
    let rows = state.store.select_all(entity).await.map_err(db_error(&route))?;
    Ok(ApiResponse::success(rows))
}
