use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence gateway
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected row format: {0}")]
    UnexpectedRow(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the connection pool for the application database
pub struct DatabaseManager;

impl DatabaseManager {
    /// Lazily connecting pool: the server starts even when the database is down and
    /// reports failures per request.
    pub fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::connection_string(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(&connection_string)?;

        info!(
            "Created database pool for: {} (max {} connections)",
            config.name, config.max_connections
        );
        Ok(pool)
    }

    /// `DATABASE_URL` when set, otherwise a URL assembled from the DB_* parts
    pub fn connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        if let Some(url) = &config.url {
            url::Url::parse(url).map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
            return Ok(url.clone());
        }

        let mut url = url::Url::parse("postgres://localhost")
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
        let invalid = |part: &str| DatabaseError::InvalidDatabaseUrl(format!("bad {}", part));

        url.set_host(Some(&config.host)).map_err(|_| invalid("host"))?;
        url.set_port(Some(config.port)).map_err(|_| invalid("port"))?;
        url.set_username(&config.user).map_err(|_| invalid("user"))?;
        if !config.password.is_empty() {
            url.set_password(Some(&config.password)).map_err(|_| invalid("password"))?;
        }
        url.set_path(&format!("/{}", config.name));
        Ok(url.into())
    }
}
