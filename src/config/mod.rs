use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub security: SecurityConfig,
    pub social: SocialConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL. When unset the URL is assembled from the DB_* parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Empty means "mirror the request origin", which is what the dashboard relies on locally.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialConfig {
    pub feed_url: String,
    pub platform: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("STATIC_DIR") {
            self.server.static_dir = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DB_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("DB_USER") {
            self.database.user = v;
        }
        if let Ok(v) = env::var("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("DB_NAME") {
            self.database.name = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_STORE") {
            self.session.backend = match v.trim().to_ascii_lowercase().as_str() {
                "postgres" | "pg" | "database" => SessionBackend::Postgres,
                "memory" => SessionBackend::Memory,
                other => {
                    tracing::warn!("Unknown SESSION_STORE '{}', keeping {:?}", other, self.session.backend);
                    self.session.backend
                }
            };
        }
        if let Ok(v) = env::var("SESSION_COOKIE_NAME") {
            if !v.trim().is_empty() {
                self.session.cookie_name = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("SESSION_COOKIE_SECURE") {
            self.session.cookie_secure = v.parse().unwrap_or(self.session.cookie_secure);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Social feed overrides
        if let Ok(v) = env::var("SOCIAL_FEED_URL") {
            self.social.feed_url = v;
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
                ..DatabaseConfig::default()
            },
            session: SessionConfig {
                backend: SessionBackend::Memory,
                cookie_name: SessionConfig::DEFAULT_COOKIE_NAME.to_string(),
                cookie_secure: false,
            },
            security: SecurityConfig { cors_origins: vec![] },
            social: SocialConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
                ..DatabaseConfig::default()
            },
            session: SessionConfig {
                backend: SessionBackend::Postgres,
                cookie_name: SessionConfig::DEFAULT_COOKIE_NAME.to_string(),
                cookie_secure: true,
            },
            security: SecurityConfig { cors_origins: vec![] },
            social: SocialConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
                ..DatabaseConfig::default()
            },
            session: SessionConfig {
                backend: SessionBackend::Postgres,
                cookie_name: SessionConfig::DEFAULT_COOKIE_NAME.to_string(),
                cookie_secure: true,
            },
            security: SecurityConfig { cors_origins: vec![] },
            social: SocialConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: "frontend".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "petcareplusdb".to_string(),
            max_connections: 10,
            connection_timeout: 30,
        }
    }
}

impl SessionConfig {
    pub const DEFAULT_COOKIE_NAME: &'static str = "petcare.sid";
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::Memory,
            cookie_name: Self::DEFAULT_COOKIE_NAME.to_string(),
            cookie_secure: false,
        }
    }
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://dummyjson.com/posts?limit=5".to_string(),
            platform: "PetCare Community Feed".to_string(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
