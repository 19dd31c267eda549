// src/tasks/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task row. `id` is assigned by the store on insert and never
/// changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
}

/// Closed status set, serialized by variant name ("Pending" / "Completed"),
/// never by ordinal. Stored in SQLite as the same text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(String);

impl std::str::FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

// Request types for the API

/// Create payload. Deliberately has no `id` field: any identifier supplied
/// by the caller is dropped during deserialization and the store assigns one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
}

/// Update payload. Carries the task id so the handler can check it against
/// the route id; all mutable fields are overwritten in full, never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_by_name() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"Pending\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"Completed\""
        );
    }

    #[test]
    fn test_status_rejects_unknown_name() {
        let parsed: Result<TaskStatus, _> = serde_json::from_str("\"Done\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_status_from_str_roundtrip() {
        assert_eq!("Pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert_eq!(
            TaskStatus::Completed.to_string().parse::<TaskStatus>().unwrap(),
            TaskStatus::Completed
        );
        assert!("archived".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_create_request_ignores_caller_id() {
        let payload = r#"{"id": 42, "title": "Buy milk", "due_date": "2024-05-01T00:00:00Z", "status": "Pending"}"#;
        let request: CreateTaskRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(request.title, "Buy milk");
        assert_eq!(request.status, TaskStatus::Pending);
    }
}
