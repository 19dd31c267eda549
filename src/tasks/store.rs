// src/tasks/store.rs

use crate::tasks::types::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};

/// Outcome of a conditional write against the tasks table.
/// `Conflict` means the row changed under us and still exists; the caller
/// decides how to surface that (no retry happens here).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    Conflict,
}

pub struct TaskStore {
    pub pool: SqlitePool,
    title_search_case_insensitive: bool,
}

const TASK_COLUMNS: &str = "id, title, description, due_date, status";

impl TaskStore {
    pub fn new(pool: SqlitePool, title_search_case_insensitive: bool) -> Self {
        Self {
            pool,
            title_search_case_insensitive,
        }
    }

    pub async fn get(&self, id: i64) -> Result<Option<Task>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, due_date, status
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.row_to_task(row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, due_date, status
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| self.row_to_task(row)).collect()
    }

    /// Substring match on title. Collation follows the configured mode:
    /// `LIKE` is case-insensitive for ASCII under SQLite's default collation,
    /// `instr` compares bytes exactly.
    pub async fn search_by_title(&self, fragment: &str) -> Result<Vec<Task>> {
        let sql = if self.title_search_case_insensitive {
            format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE title LIKE '%' || ? || '%' ORDER BY id"
            )
        } else {
            format!("SELECT {TASK_COLUMNS} FROM tasks WHERE instr(title, ?) > 0 ORDER BY id")
        };

        let rows = sqlx::query(&sql)
            .bind(fragment)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|row| self.row_to_task(row)).collect()
    }

    /// Matches on the calendar date of `due_date`, ignoring time-of-day.
    pub async fn search_by_date(&self, date: NaiveDate) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, due_date, status
            FROM tasks
            WHERE date(due_date) = ?
            ORDER BY id
            "#,
        )
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| self.row_to_task(row)).collect()
    }

    pub async fn filter_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, due_date, status
            FROM tasks
            WHERE status = ?
            ORDER BY id
            "#,
        )
        .bind(status.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| self.row_to_task(row)).collect()
    }

    pub async fn create(&self, request: CreateTaskRequest) -> Result<Task> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (title, description, due_date, status, version)
            VALUES (?, ?, ?, ?, 1)
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.due_date.naive_utc())
        .bind(request.status.to_string())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(%id, "created task");

        Ok(Task {
            id,
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            status: request.status,
        })
    }

    /// Full overwrite of the mutable fields. Reads the current concurrency
    /// token and delegates to [`update_at_version`](Self::update_at_version).
    pub async fn update(&self, id: i64, request: UpdateTaskRequest) -> Result<UpdateOutcome> {
        let row = sqlx::query("SELECT version FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(UpdateOutcome::NotFound);
        };
        let version: i64 = row.get("version");

        self.update_at_version(id, version, request).await
    }

    /// Conditional write: succeeds only while the stored version still equals
    /// `version`. Zero rows affected means the row was modified or deleted
    /// since it was read; the existence re-check decides which.
    pub async fn update_at_version(
        &self,
        id: i64,
        version: i64,
        request: UpdateTaskRequest,
    ) -> Result<UpdateOutcome> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, due_date = ?, status = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.due_date.naive_utc())
        .bind(request.status.to_string())
        .bind(id)
        .bind(version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(%id, "updated task");
            return Ok(UpdateOutcome::Updated);
        }

        if self.exists(id).await? {
            warn!(%id, "concurrent modification detected, not retrying");
            Ok(UpdateOutcome::Conflict)
        } else {
            Ok(UpdateOutcome::NotFound)
        }
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(%id, "deleted task");
        }
        Ok(deleted)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    // Helper methods

    fn row_to_task(&self, row: sqlx::sqlite::SqliteRow) -> Result<Task> {
        let id: i64 = row.get("id");
        let title: String = row.get("title");
        let description: Option<String> = row.get("description");
        let due_date: NaiveDateTime = row.get("due_date");
        let status_str: String = row.get("status");

        let status = status_str.parse::<TaskStatus>()?;

        Ok(Task {
            id,
            title,
            description,
            due_date: Utc.from_utc_datetime(&due_date),
            status,
        })
    }
}
