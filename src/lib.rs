//! # taskrepo - SQLite task repository
//!
//! Basic create, read, update and delete operations over a single `task`
//! table. Connections come from a caller-supplied [`ConnectionSource`]; each
//! repository call acquires one, runs its statement and releases it.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod error;

// Re-export commonly used types
pub use crate::core::{Task, TaskRepository};
pub use db::{ConnectionSource, Schema, SqliteSource};
pub use error::{Error, Result};
