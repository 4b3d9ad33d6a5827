//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup calls this only when `DATABASE_URL` is set. The pool backs the
//! PostgreSQL note store; migrations create the `notes` table and the
//! trigger that feeds the `notes_changed` notification channel.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;
    info!(max_connections, "database pool ready; migrations applied");

    Ok(pool)
}
