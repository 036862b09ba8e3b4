// handlers/public/auth/login.rs - POST /api/login handler

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{info, warn};

use crate::app::AppState;
use crate::auth::{Identity, Role};
use crate::error::ApiError;
use crate::handlers::db_error;
use crate::middleware::JsonBody;
use crate::session::{CookieSettings, CurrentSession};
use crate::validation::{has_required, text_field, validate_email};

const ROUTE: &str = "/api/login";

/**
 * POST /api/login - Authenticate and start a session
 *
 * Expected Input:
 * ```json
 * { "email": "vet@petcare.ca", "password": "secret" }
 * ```
 *
 * Expected Output (Success):
 * ```json
 * { "message": "Logged in successfully", "role": "admin" }
 * ```
 *
 * The session cookie is set on the response. An existing session on the
 * request is replaced.
 */
pub async fn login_post(
    State(state): State<AppState>,
    session: CurrentSession,
    JsonBody(body): JsonBody,
) -> Result<Response, ApiError> {
    if !has_required(&body, &["email", "password"]) {
        return Err(ApiError::bad_request("Email and password are required"));
    }
    let email = text_field(&body, "email");
    let password = text_field(&body, "password");
    if !validate_email(&email) {
        return Err(ApiError::bad_request("Invalid email format"));
    }

    let user = state
        .store
        .find_user(&email, &password)
        .await
        .map_err(db_error(ROUTE))?;
    let Some(user) = user else {
        warn!("Failed login attempt for {}", email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    };

    let role = state
        .store
        .find_role(&email)
        .await
        .map_err(db_error(ROUTE))?
        .unwrap_or_else(|| Role::User.as_str().to_string());

    if let Some(previous) = session.token.as_deref() {
        state.sessions.destroy(previous).await?;
    }
    let token = state
        .sessions
        .create(Identity::new(user.id, user.email.clone(), role.clone()))
        .await?;
    let cookie = CookieSettings::header_value(&state.cookies.session_cookie(&token))?;

    info!("User {} logged in as {}", user.email, role);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "message": "Logged in successfully", "role": role })),
    )
        .into_response())
}
