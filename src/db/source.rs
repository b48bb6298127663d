//! Connection sources.
//!
//! A [`ConnectionSource`] hands out a live connection on demand. The repository
//! acquires one per operation and drops it before returning, so whatever the
//! source does on acquire (open a file, check out of a pool) happens once per
//! call.

use crate::error::Result;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default busy timeout applied to every connection.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Something that can produce a live database connection.
pub trait ConnectionSource {
    /// Acquire a connection. The caller owns it until it is dropped.
    fn connect(&self) -> Result<Connection>;
}

impl<S: ConnectionSource + ?Sized> ConnectionSource for &S {
    fn connect(&self) -> Result<Connection> {
        (**self).connect()
    }
}

impl<S: ConnectionSource + ?Sized> ConnectionSource for Arc<S> {
    fn connect(&self) -> Result<Connection> {
        (**self).connect()
    }
}

/// Settings for [`SqliteSource`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
    /// Create the file if it does not exist yet.
    pub create: bool,
}

impl SourceConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            create: true,
        }
    }
}

/// Opens a fresh SQLite connection to a file on every acquire.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    config: SourceConfig,
}

impl SqliteSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Source for the file at `path` with default settings.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::new(SourceConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

impl ConnectionSource for SqliteSource {
    fn connect(&self) -> Result<Connection> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if self.config.create {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }

        let conn = Connection::open_with_flags(&self.config.path, flags)?;
        conn.busy_timeout(self.config.busy_timeout)?;
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_connect_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.db");
        let source = SqliteSource::open(&path);

        assert!(!path.exists());
        source.connect().unwrap();
        assert!(path.exists());
        assert_eq!(source.path(), path.as_path());
    }

    #[test]
    fn test_connect_without_create_fails_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut config = SourceConfig::new(dir.path().join("missing.db"));
        config.create = false;

        let err = SqliteSource::new(config).connect().unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_table_persists_across_connections() {
        let dir = TempDir::new().unwrap();
        let source = Arc::new(SqliteSource::open(dir.path().join("tasks.db")));

        let first = source.connect().unwrap();
        first.execute("CREATE TABLE t (x INTEGER)", []).unwrap();
        drop(first);

        let second = source.connect().unwrap();
        let count: i64 = second
            .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
