//! Task table definition.

use crate::db::ConnectionSource;
use crate::error::Result;
use rusqlite::Connection;

/// Name of the table the repository reads and writes.
pub const TASK_TABLE: &str = "task";

const CREATE_TASK_TABLE: &str = "CREATE TABLE IF NOT EXISTS task (
    task_id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    finished BOOLEAN NOT NULL,
    created_date TIMESTAMP NOT NULL
        CHECK (created_date GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]*')
)";

/// Schema bootstrap.
///
/// Creates the task table when it is missing and leaves an existing one alone.
/// Nothing here alters or versions a table that is already there.
///
/// `created_date` must start with a four-digit year so that ordering the text
/// column orders the timestamps. Years outside 0000..=9999 are rejected.
pub struct Schema;

impl Schema {
    /// Create the task table on the given connection if it does not exist.
    pub fn ensure(conn: &Connection) -> Result<()> {
        conn.execute(CREATE_TASK_TABLE, [])?;
        Ok(())
    }

    /// Create the task table through a connection source.
    pub fn ensure_with<S: ConnectionSource>(source: &S) -> Result<()> {
        let conn = source.connect()?;
        Self::ensure(&conn)
    }

    /// Check if the task table exists.
    pub fn exists(conn: &Connection) -> Result<bool> {
        let mut stmt =
            conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
        Ok(stmt.exists([TASK_TABLE])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_creates_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!Schema::exists(&conn).unwrap());

        Schema::ensure(&conn).unwrap();
        assert!(Schema::exists(&conn).unwrap());
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        Schema::ensure(&conn).unwrap();
        conn.execute(
            "INSERT INTO task (title, finished, created_date) VALUES ('keep', 0, '2024-01-01 00:00:00')",
            [],
        )
        .unwrap();

        Schema::ensure(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM task", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_created_date_needs_four_digit_year() {
        let conn = Connection::open_in_memory().unwrap();
        Schema::ensure(&conn).unwrap();

        for bad in ["+10000-01-01 00:00:00", "-0001-01-01 00:00:00", "yesterday"] {
            let result = conn.execute(
                "INSERT INTO task (title, finished, created_date) VALUES ('t', 0, ?1)",
                [bad],
            );
            assert!(result.is_err(), "accepted {bad}");
        }

        conn.execute(
            "INSERT INTO task (title, finished, created_date) VALUES ('t', 0, '9999-12-31 23:59:59.5')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_title_is_required() {
        let conn = Connection::open_in_memory().unwrap();
        Schema::ensure(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO task (title, finished, created_date) VALUES (NULL, 0, '2024-01-01 00:00:00')",
            [],
        );
        assert!(result.is_err());
    }
}
