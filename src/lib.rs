// src/lib.rs

pub mod api;
pub mod config;
pub mod db;
pub mod state;
pub mod tasks;

pub use state::AppState;
