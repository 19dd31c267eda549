// src/tasks/mod.rs

pub mod store;
pub mod types;

pub use store::{TaskStore, UpdateOutcome};
pub use types::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest};
