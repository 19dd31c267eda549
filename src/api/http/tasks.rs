// src/api/http/tasks.rs
// Task CRUD handlers, mounted under /tarefas

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info};

use crate::{
    api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption},
    state::AppState,
    tasks::{CreateTaskRequest, TaskStatus, UpdateOutcome, UpdateTaskRequest},
};

// Query parameter names follow the public API surface (Portuguese),
// matching the route names.

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub titulo: String,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub data: NaiveDate,
}

/// An invalid status name fails deserialization here, so the store only
/// ever sees members of the closed enum.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: TaskStatus,
}

/// GET /tarefas/{id}
pub async fn get_task(
    State(app): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let task = app
        .task_store
        .get(id)
        .await
        .into_api_error("Failed to load task")?
        .ok_or_not_found("Task not found")?;

    Ok(Json(task))
}

/// GET /tarefas/ObterTodos
pub async fn list_tasks(State(app): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let tasks = app
        .task_store
        .list_all()
        .await
        .into_api_error("Failed to list tasks")?;

    Ok(Json(tasks))
}

/// GET /tarefas/ObterPorTitulo?titulo=...
pub async fn search_by_title(
    State(app): State<Arc<AppState>>,
    Query(query): Query<TitleQuery>,
) -> ApiResult<impl IntoResponse> {
    if query.titulo.trim().is_empty() {
        return Err(ApiError::bad_request("title must not be empty"));
    }

    let tasks = app
        .task_store
        .search_by_title(&query.titulo)
        .await
        .into_api_error("Failed to search tasks by title")?;

    Ok(Json(tasks))
}

/// GET /tarefas/ObterPorData?data=YYYY-MM-DD
///
/// Always returns a (possibly empty) list; a date with no tasks is not an
/// error.
pub async fn search_by_date(
    State(app): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> ApiResult<impl IntoResponse> {
    let tasks = app
        .task_store
        .search_by_date(query.data)
        .await
        .into_api_error("Failed to search tasks by date")?;

    Ok(Json(tasks))
}

/// GET /tarefas/ObterPorStatus?status=...
pub async fn filter_by_status(
    State(app): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<impl IntoResponse> {
    let tasks = app
        .task_store
        .filter_by_status(query.status)
        .await
        .into_api_error("Failed to filter tasks by status")?;

    Ok(Json(tasks))
}

/// POST /tarefas
pub async fn create_task(
    State(app): State<Arc<AppState>>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    let task = app
        .task_store
        .create(payload)
        .await
        .into_api_error("Failed to create task")?;

    let location = format!("/tarefas/{}", task.id);
    info!(id = task.id, "task created via API");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(task),
    ))
}

/// PUT /tarefas/{id}
///
/// The body must carry the same id as the route. A write that loses an
/// optimistic-concurrency race is re-checked once: row gone means 404,
/// row still present is unrecoverable here and becomes a server error.
pub async fn update_task(
    State(app): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    if id != payload.id {
        return Err(ApiError::bad_request(
            "route id does not match the task id in the request body",
        ));
    }

    let outcome = app
        .task_store
        .update(id, payload)
        .await
        .into_api_error("Failed to update task")?;

    match outcome {
        UpdateOutcome::Updated => Ok(StatusCode::NO_CONTENT),
        UpdateOutcome::NotFound => Err(ApiError::not_found("Task not found")),
        UpdateOutcome::Conflict => {
            error!(%id, "update lost a concurrency race against a surviving row");
            Err(ApiError::internal("Task was modified concurrently"))
        }
    }
}

/// DELETE /tarefas/{id}
pub async fn delete_task(
    State(app): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let deleted = app
        .task_store
        .delete(id)
        .await
        .into_api_error("Failed to delete task")?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Task not found"))
    }
}
