// handlers/public/auth/logout.rs - POST /api/logout handler

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::app::AppState;
use crate::error::ApiError;
use crate::session::{CookieSettings, CurrentSession};

/// POST /api/logout - Always succeeds; drops the session if there is one.
pub async fn logout_post(State(state): State<AppState>, session: CurrentSession) -> Result<Response, ApiError> {
    if let Some(token) = session.token.as_deref() {
        state.sessions.destroy(token).await?;
    }
    if let Some(identity) = &session.identity {
        tracing::info!("User {} logged out", identity.email);
    }

    let cookie = CookieSettings::header_value(&state.cookies.expired_cookie())?;
    Ok(([(header::SET_COOKIE, cookie)], Json(json!({ "message": "Logged out" }))).into_response())
}
