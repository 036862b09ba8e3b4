// handlers/protected/social.rs - Community feed import and log

use axum::extract::State;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::handlers::db_error;
use crate::middleware::ApiResponse;
use crate::types::Row;

pub const FETCH_FAILED: &str = "Failed to fetch PetCare posts";

/// Entries returned by `GET /api/social/logs`
pub const LOG_LIMIT: i64 = 50;

/**
 * POST /api/social/fetch - Pull up to five feed items into `SocialLog`
 *
 * Expected Output (Success):
 * ```json
 * {
 *   "message": "PetCare community posts fetched and saved",
 *   "count": 5,
 *   "platform": "PetCare Community Feed"
 * }
 * ```
 *
 * Inserts run one at a time; a failure part way leaves earlier rows in place
 * and the response is 500.
 */
pub async fn fetch(State(state): State<AppState>) -> ApiResult<ApiResponse<Value>> {
    let posts = state.feed.fetch_posts().await.map_err(|e| {
        error!("Social feed fetch failed: {}", e);
        ApiError::internal_server_error(FETCH_FAILED)
    })?;

    let entries = state.feed.log_entries(&posts);
    for entry in &entries {
        state.store.insert_social_log(entry).await.map_err(|e| {
            error!("DB error in POST /api/social/fetch: {}", e);
            ApiError::internal_server_error(FETCH_FAILED)
        })?;
    }

    info!("Imported {} posts from {}", entries.len(), state.feed.platform());
    Ok(ApiResponse::success(json!({
        "message": "PetCare community posts fetched and saved",
        "count": entries.len(),
        "platform": state.feed.platform(),
    })))
}

/// GET /api/social/logs - newest 50 entries
pub async fn logs(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Row>>> {
    let rows = state
        .store
        .recent_social_logs(LOG_LIMIT)
        .await
        .map_err(db_error("GET /api/social/logs"))?;
    Ok(ApiResponse::success(rows))
}
