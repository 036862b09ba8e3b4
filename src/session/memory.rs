use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{new_token, SessionError, SessionStore};
use crate::auth::Identity;

/// Process-local session store. Sessions vanish on restart.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Identity>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, identity: Identity) -> Result<String, SessionError> {
        let token = new_token();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), identity);
        Ok(token)
    }

    async fn current(&self, token: &str) -> Result<Option<Identity>, SessionError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(token).cloned())
    }

    async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        Ok(())
    }
}
