// src/state.rs

use sqlx::SqlitePool;

use crate::tasks::TaskStore;

/// Shared application state handed to the router as `Arc<AppState>`.
/// The store is passed in by constructor; there is no global handle.
pub struct AppState {
    pub task_store: TaskStore,
}

impl AppState {
    pub fn new(pool: SqlitePool, title_search_case_insensitive: bool) -> Self {
        Self {
            task_store: TaskStore::new(pool, title_search_case_insensitive),
        }
    }
}
