use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::{self, Identity, Role};
use crate::error::ApiError;
use crate::session::CurrentSession;

/// Route layer: any logged-in session. Inserts the [`Identity`] into request
/// extensions for the handler.
pub async fn require_login(session: CurrentSession, mut request: Request, next: Next) -> Result<Response, ApiError> {
    let identity = auth::require_login(session.identity.as_ref())?.clone();
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Route layer: admin sessions only
pub async fn require_admin(session: CurrentSession, mut request: Request, next: Next) -> Result<Response, ApiError> {
    let identity: Identity = auth::require_role(session.identity.as_ref(), Role::Admin)?.clone();
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
