//! Database pool configuration and schema bootstrap

use anyhow::Result;
use sqlx::Executor;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tracing::info;

/// Latest schema for the tasks table. The `version` column is the
/// optimistic-concurrency token; it never leaves the store layer.
const CREATE_TASKS: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    due_date DATETIME NOT NULL,
    status TEXT NOT NULL CHECK (status IN ('Pending', 'Completed')),
    version INTEGER NOT NULL DEFAULT 1
);
"#;

/// Create an optimized SQLite connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        // SQLite is single-writer, but can have multiple readers
        .max_connections(max_connections)
        // Don't wait too long for a connection
        .acquire_timeout(Duration::from_secs(10))
        // Recycle connections periodically
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))
}

/// Ensure the schema exists. Idempotent; run at startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_TASKS).await?;
    info!("Database schema ready");
    Ok(())
}
