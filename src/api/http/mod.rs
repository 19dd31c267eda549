// src/api/http/mod.rs

pub mod handlers;
pub mod router;
pub mod tasks;

pub use router::{http_router, task_router};
