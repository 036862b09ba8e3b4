use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Store;
use crate::session::{CookieSettings, SessionStore};
use crate::social::{FeedClient, FeedError};

/// Everything a handler can reach. Cloned per request; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<dyn SessionStore>,
    pub cookies: CookieSettings,
    pub feed: FeedClient,
    pub static_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        sessions: Arc<dyn SessionStore>,
        config: &AppConfig,
    ) -> Result<Self, FeedError> {
        Ok(Self {
            store,
            sessions,
            cookies: CookieSettings::new(config.session.cookie_name.clone(), config.session.cookie_secure),
            feed: FeedClient::new(&config.social)?,
            static_dir: PathBuf::from(&config.server.static_dir),
            cors_origins: config.security.cors_origins.clone(),
        })
    }
}
