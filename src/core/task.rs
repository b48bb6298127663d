//! Task record.

use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// One row of the task table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the storage engine; `None` until the task is inserted.
    pub id: Option<i64>,
    pub title: String,
    pub finished: bool,
    /// Stored as given, no timezone conversion.
    pub created_date: NaiveDateTime,
}

impl Task {
    /// Create an unsaved task.
    pub fn new(title: impl Into<String>, finished: bool, created_date: NaiveDateTime) -> Self {
        Self {
            id: None,
            title: title.into(),
            finished,
            created_date,
        }
    }

    /// Build a task from a row whose columns are `(task_id, title, finished, created_date)`.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            finished: row.get(2)?,
            created_date: row.get(3)?,
        })
    }

    /// Get the status character for display.
    pub fn status_char(&self) -> char {
        if self.finished {
            '✓'
        } else {
            '○'
        }
    }
}
