// handlers/protected/export.rs - GET /api/export/owners.csv

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::csv;
use crate::database::Entity;
use crate::error::ApiError;
use crate::handlers::db_error;

/// Owners as a CSV attachment
pub async fn owners_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let rows = state
        .store
        .select_all(Entity::Owner)
        .await
        .map_err(db_error("GET /api/export/owners.csv"))?;

    Ok((
        [
            (header::CONTENT_TYPE, csv::CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, csv::OWNERS_DISPOSITION),
        ],
        csv::owners_csv(&rows),
    )
        .into_response())
}
