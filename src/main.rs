use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use petcare_api::cli::ServerArgs;
use petcare_api::config::{self, SessionBackend};
use petcare_api::database::{DatabaseManager, PgStore, Store};
use petcare_api::session::{MemorySessionStore, PgSessionStore, SessionStore};
use petcare_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so local runs pick up DATABASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("petcare_api=info,tower_http=info")),
        )
        .init();

    let args = ServerArgs::parse();
    let mut config = config::config().clone();
    args.apply(&mut config);
    info!("Starting PetCare API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database).context("failed to configure database pool")?;
    let store = Arc::new(PgStore::new(pool.clone()));

    // Requests report database failures individually; startup only logs
    match store.ping().await {
        Ok(()) => info!("Connected to database {}", config.database.name),
        Err(e) => error!("Database connection failed: {}", e),
    }

    let sessions: Arc<dyn SessionStore> = match config.session.backend {
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        SessionBackend::Postgres => {
            let sessions = PgSessionStore::new(pool);
            if let Err(e) = sessions.ensure_schema().await {
                error!("Could not prepare session table: {}", e);
            }
            Arc::new(sessions)
        }
    };

    let state = AppState::new(store, sessions, &config).context("failed to build HTTP client")?;
    let app = router(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("PetCare API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
