// handlers/protected/search.rs - Owner and appointment search

use axum::extract::State;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::filter::{AppointmentFilter, AppointmentSearchQuery, OwnerSearch};
use crate::handlers::db_error;
use crate::middleware::{ApiResponse, QueryParams};
use crate::types::Row;

#[derive(Debug, Default, Deserialize)]
pub struct OwnerSearchQuery {
    pub q: Option<String>,
}

/// GET /api/owners/search?q= - substring match on name or email; blank `q` is `[]`
pub async fn owners(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<OwnerSearchQuery>,
) -> ApiResult<ApiResponse<Vec<Row>>> {
    let Some(search) = OwnerSearch::new(query.q.as_deref().unwrap_or("")) else {
        return Ok(ApiResponse::success(Vec::new()));
    };

    let rows = state
        .store
        .search_owners(&search)
        .await
        .map_err(db_error("GET /api/owners/search"))?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/appointments/search?status=&from=&to= - only supplied filters apply
pub async fn appointments(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AppointmentSearchQuery>,
) -> ApiResult<ApiResponse<Vec<Row>>> {
    let filter = AppointmentFilter::from_query(query);
    let rows = state
        .store
        .search_appointments(&filter)
        .await
        .map_err(db_error("GET /api/appointments/search"))?;
    Ok(ApiResponse::success(rows))
}
