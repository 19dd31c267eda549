// src/api/http/router.rs
// HTTP router composition for the task API

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use super::{
    handlers::health_handler,
    tasks::{
        create_task, delete_task, filter_by_status, get_task, list_tasks, search_by_date,
        search_by_title, update_task,
    },
};
use crate::state::AppState;

/// Task routes, intended to be nested under /tarefas.
/// Named lookup routes are registered alongside /{id}; the router gives
/// static segments precedence, so /ObterTodos never binds as an id.
pub fn task_router() -> Router<Arc<AppState>> {
    Router::new()
        // Lookups
        .route("/ObterTodos", get(list_tasks))
        .route("/ObterPorTitulo", get(search_by_title))
        .route("/ObterPorData", get(search_by_date))
        .route("/ObterPorStatus", get(filter_by_status))
        // CRUD
        .route("/", post(create_task))
        .route("/{id}", get(get_task).put(update_task).delete(delete_task))
}

/// Main HTTP router: health plus the task resource.
pub fn http_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/tarefas", task_router())
        .with_state(app_state)
}
