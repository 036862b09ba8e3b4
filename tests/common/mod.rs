#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde_json::{json, Value};

use petcare_api::config::AppConfig;
use petcare_api::database::MemoryStore;
use petcare_api::session::MemorySessionStore;
use petcare_api::{router, AppState};

pub const ADMIN_EMAIL: &str = "admin@petcare.ca";
pub const ADMIN_PASSWORD: &str = "adminpass";
pub const USER_EMAIL: &str = "user@petcare.ca";
pub const USER_PASSWORD: &str = "userpass";
pub const GUEST_EMAIL: &str = "guest@petcare.ca";
pub const GUEST_PASSWORD: &str = "guestpass";

/// A router served on a free local port, backed by in-memory stores.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: MemoryStore,
    pub sessions: MemorySessionStore,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with_feed("http://127.0.0.1:9/posts").await
    }

    /// Same as [`TestServer::start`] with the social feed pointed at `feed_url`
    pub async fn start_with_feed(feed_url: &str) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = MemoryStore::new();
        store.add_user(1, ADMIN_EMAIL, ADMIN_PASSWORD, Some("admin")).await;
        store.add_user(2, USER_EMAIL, USER_PASSWORD, Some("user")).await;
        store.add_user(3, GUEST_EMAIL, GUEST_PASSWORD, Some("guest")).await;
        let sessions = MemorySessionStore::new();

        let mut config = AppConfig::development();
        config.server.port = port;
        config.server.static_dir = fixtures_dir().to_string_lossy().into_owned();
        config.social.feed_url = feed_url.to_string();

        let state = AppState::new(Arc::new(store.clone()), Arc::new(sessions.clone()), &config)?;
        let app = router(state);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        Ok(Self {
            port,
            base_url,
            store,
            sessions,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A fresh client that keeps cookies between requests
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("reqwest client")
    }

    pub async fn login(&self, client: &Client, email: &str, password: &str) -> Result<Response> {
        let res = client
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn admin(&self) -> Result<Client> {
        self.client_as(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn user(&self) -> Result<Client> {
        self.client_as(USER_EMAIL, USER_PASSWORD).await
    }

    pub async fn client_as(&self, email: &str, password: &str) -> Result<Client> {
        let client = self.client();
        let res = self.login(&client, email, password).await?;
        anyhow::ensure!(res.status().is_success(), "login as {} failed: {}", email, res.status());
        Ok(client)
    }
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/frontend")
}

pub fn owner(id: i64, first: &str, last: &str, email: &str) -> Value {
    json!({
        "owner_id": id,
        "first_name": first,
        "last_name": last,
        "phone": "555-0100",
        "email": email,
        "address": "1 Main St"
    })
}

pub fn appointment(id: i64, date: &str, time: &str, status: &str) -> Value {
    json!({
        "appointment_id": id,
        "pet_id": 1,
        "vet_id": 1,
        "appointment_date": date,
        "appointment_time": time,
        "reason": "checkup",
        "status": status
    })
}

/// Assert a JSON error envelope and return nothing else
pub async fn expect_error(res: Response, status: u16, message: &str) -> Result<()> {
    assert_eq!(res.status().as_u16(), status);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "error": message }));
    Ok(())
}
