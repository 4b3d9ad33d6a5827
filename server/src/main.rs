#![recursion_limit = "256"]

mod config;
mod db;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, ServerConfig};
use crate::store::NoteStore;
use crate::store::memory::MemoryStore;
use crate::store::postgres::PgStore;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database init failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("note store init failed: {0}")]
    Store(#[from] store::StoreError),
    #[error("{0}")]
    Leptos(String),
    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    let store: Arc<dyn NoteStore> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::init_pool(url, config.db_max_connections).await?;
            Arc::new(PgStore::connect(pool, config.feed_capacity).await?)
        }
        None => {
            warn!("DATABASE_URL not set; notes live in memory and vanish on restart");
            Arc::new(MemoryStore::new(config.feed_capacity))
        }
    };
    info!(backend = store.backend(), "note store ready");

    let state = state::AppState::new(store, &config);
    let app = routes::leptos_app(state).map_err(StartupError::Leptos)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!(port = config.port, "love notes listening");
    axum::serve(listener, app).await?;
    Ok(())
}
