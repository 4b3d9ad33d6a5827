//! Server configuration parsed from environment variables.
//!
//! Required: nothing. Every knob has a default so `cargo run` works against
//! the in-memory store.
//!
//! Optional:
//! - `PORT`: listen port, default 3000
//! - `DATABASE_URL`: PostgreSQL URL; absent selects the in-memory store
//! - `DB_MAX_CONNECTIONS`: pool size, default 5
//! - `NOTES_FEED_CAPACITY`: change-feed buffer per subscriber, default 64
//! - `WS_OUTBOUND_CAPACITY`: per-connection outbound frame buffer, default 256

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_FEED_CAPACITY: usize = 64;
pub const DEFAULT_WS_OUTBOUND_CAPACITY: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub feed_capacity: usize,
    pub ws_outbound_capacity: usize,
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPort` when `PORT` is set but not a valid port number.
    /// Other malformed values fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            port,
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            feed_capacity: env_parse("NOTES_FEED_CAPACITY", DEFAULT_FEED_CAPACITY).max(1),
            ws_outbound_capacity: env_parse("WS_OUTBOUND_CAPACITY", DEFAULT_WS_OUTBOUND_CAPACITY).max(1),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            feed_capacity: DEFAULT_FEED_CAPACITY,
            ws_outbound_capacity: DEFAULT_WS_OUTBOUND_CAPACITY,
        }
    }
}

/// Parse an environment variable, returning `default` when missing or invalid.
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
