//! Error types for the task repository.

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the task repository.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Storage access failed: connecting, preparing, executing or reading a row.
    #[error("Storage access failed: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The task passed to `finish_task` has no row behind it.
    #[error("Cannot finish {}: no such task", format_task_ref(.0))]
    FinishTargetNotFound(Option<i64>),

    /// A lookup by primary key matched more than one row.
    #[error("Task #{0} matched more than one row")]
    DuplicateRows(i64),

    /// Task not found.
    #[error("Task #{0} not found")]
    TaskNotFound(i64),

    /// Timestamp argument could not be parsed.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from the storage engine.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}

/// Describe a task reference that may not have been persisted yet.
pub fn format_task_ref(id: &Option<i64>) -> String {
    match id {
        Some(id) => format!("task #{id}"),
        None => "unsaved task".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_format_task_ref() {
        assert_eq!(format_task_ref(&Some(7)), "task #7");
        assert_eq!(format_task_ref(&None), "unsaved task");
    }

    #[test]
    fn test_finish_target_message() {
        let err = Error::FinishTargetNotFound(Some(42));
        assert_eq!(err.to_string(), "Cannot finish task #42: no such task");
    }

    #[test]
    fn test_storage_keeps_source() {
        let err = Error::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.is_storage());
        assert!(err.source().is_some());
    }
}
