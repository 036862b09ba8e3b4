use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use tracing::info;

use super::{new_token, SessionError, SessionStore};
use crate::auth::Identity;

/// Session store backed by a `sessions` table. Only the SHA-256 of a token is stored.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the sessions table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token_hash TEXT PRIMARY KEY,
                user_id BIGINT NOT NULL,
                email TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Session table ready");
        Ok(())
    }

    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, identity: Identity) -> Result<String, SessionError> {
        let token = new_token();

        sqlx::query("INSERT INTO sessions (token_hash, user_id, email, role) VALUES ($1, $2, $3, $4)")
            .bind(Self::hash_token(&token))
            .bind(identity.id)
            .bind(&identity.email)
            .bind(&identity.role)
            .execute(&self.pool)
            .await?;

        Ok(token)
    }

    async fn current(&self, token: &str) -> Result<Option<Identity>, SessionError> {
        let row = sqlx::query("SELECT user_id, email, role FROM sessions WHERE token_hash = $1")
            .bind(Self::hash_token(token))
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Identity {
                id: row.try_get("user_id")?,
                email: row.try_get("email")?,
                role: row.try_get("role")?,
            })),
            None => Ok(None),
        }
    }

    async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(Self::hash_token(token))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
