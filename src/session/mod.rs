//! Server-side sessions keyed by an opaque cookie token.
//!
//! Handlers never look sessions up globally: the [`CurrentSession`] extractor reads
//! the cookie and resolves it against the [`SessionStore`] held in `AppState`.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use thiserror::Error;

use crate::app::AppState;
use crate::auth::Identity;
use crate::error::ApiError;

pub mod memory;
pub mod postgres;

pub use memory::MemorySessionStore;
pub use postgres::PgSessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Pluggable storage for session identities
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store the identity under a fresh token and return the token.
    async fn create(&self, identity: Identity) -> Result<String, SessionError>;

    /// Identity for a token, if the session exists.
    async fn current(&self, token: &str) -> Result<Option<Identity>, SessionError>;

    /// Remove a session. Unknown tokens are not an error.
    async fn destroy(&self, token: &str) -> Result<(), SessionError>;
}

/// New opaque session token
pub fn new_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Cookie attributes for the session cookie
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    /// `Set-Cookie` value carrying a session token
    pub fn session_cookie(&self, token: &str) -> String {
        let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", self.name, token);
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that makes the browser drop the session cookie
    pub fn expired_cookie(&self) -> String {
        let mut cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", self.name);
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    pub fn header_value(cookie: &str) -> Result<HeaderValue, ApiError> {
        HeaderValue::from_str(cookie).map_err(|e| {
            tracing::error!("Invalid Set-Cookie value: {}", e);
            ApiError::internal_server_error(ApiError::INTERNAL_ERROR)
        })
    }

    /// Token from the request's `Cookie` header, if our cookie is present and non-empty
    pub fn read_token(&self, headers: &HeaderMap) -> Option<String> {
        for value in headers.get_all(header::COOKIE) {
            let Ok(cookie_str) = value.to_str() else {
                continue;
            };
            for cookie in cookie_str.split(';') {
                if let Some((name, token)) = cookie.trim().split_once('=') {
                    if name == self.name && !token.is_empty() {
                        return Some(token.to_string());
                    }
                }
            }
        }
        None
    }
}

/// Session context for one request
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    pub token: Option<String>,
    pub identity: Option<Identity>,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = state.cookies.read_token(&parts.headers) else {
            return Ok(CurrentSession::default());
        };

        let identity = state.sessions.current(&token).await?;
        if identity.is_none() {
            tracing::debug!("Session cookie does not match a live session");
        }

        Ok(CurrentSession {
            token: Some(token),
            identity,
        })
    }
}
