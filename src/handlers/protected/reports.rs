// handlers/protected/reports.rs - Monthly stats and read-only view passthrough

use axum::extract::State;
use axum::Extension;

use crate::app::AppState;
use crate::database::models::MonthCount;
use crate::error::ApiResult;
use crate::handlers::db_error;
use crate::middleware::ApiResponse;
use crate::types::{ReportView, Row};

/// GET /api/stats/appointments-per-month - `[{ "month": "2024-01", "count": 3 }]`, ascending
pub async fn appointments_per_month(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<MonthCount>>> {
    let counts = state
        .store
        .appointments_per_month()
        .await
        .map_err(db_error("GET /api/stats/appointments-per-month"))?;
    Ok(ApiResponse::success(counts))
}

/// GET /api/views/<slug> - rows of the view exactly as the database returns them
pub async fn view(
    State(state): State<AppState>,
    Extension(view): Extension<ReportView>,
) -> ApiResult<ApiResponse<Vec<Row>>> {
    let route = format!("GET {}", view.path());
    let rows = state.store.select_view(view).await.map_err(db_error(&route))?;
    Ok(ApiResponse::success(rows))
}
