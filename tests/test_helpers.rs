// tests/test_helpers.rs
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;

use organizador::{AppState, db};

/// Build a minimal AppState for integration tests.
/// Uses in-memory SQLite with the schema applied.
pub async fn create_test_app_state() -> Arc<AppState> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("create in-memory sqlite");

    db::run_migrations(&pool).await.expect("apply schema");

    Arc::new(AppState::new(pool, true))
}
