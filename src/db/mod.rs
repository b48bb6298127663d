//! Database layer.
//!
//! Handles where connections come from and the shape of the task table.

pub mod schema;
mod source;

pub use schema::{Schema, TASK_TABLE};
pub use source::{ConnectionSource, SourceConfig, SqliteSource, DEFAULT_BUSY_TIMEOUT};
