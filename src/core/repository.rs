//! Task repository - CRUD over the task table.

use crate::core::Task;
use crate::db::ConnectionSource;
use crate::error::{Error, Result};
use rusqlite::OptionalExtension;
use tracing::debug;

const INSERT_TASK: &str = "INSERT INTO task (title, finished, created_date) VALUES (?1, ?2, ?3)";
const SELECT_ALL: &str =
    "SELECT task_id, title, finished, created_date FROM task ORDER BY task_id";
const SELECT_BY_ID: &str =
    "SELECT task_id, title, finished, created_date FROM task WHERE task_id = ?1";
const SELECT_UNFINISHED: &str =
    "SELECT task_id, title, finished, created_date FROM task WHERE finished = 0";
const SELECT_NEWEST: &str =
    "SELECT task_id, title, finished, created_date FROM task ORDER BY created_date DESC LIMIT ?1";
const FINISH_TASK: &str = "UPDATE task SET finished = 1 WHERE task_id = ?1
     RETURNING task_id, title, finished, created_date";
const DELETE_ALL: &str = "DELETE FROM task";
const DELETE_BY_ID: &str = "DELETE FROM task WHERE task_id = ?1";

/// Task repository.
///
/// Holds only the connection source. Every method acquires its own connection
/// and drops it before returning, on success and on error alike.
#[derive(Debug, Clone)]
pub struct TaskRepository<S> {
    source: S,
}

impl<S: ConnectionSource> TaskRepository<S> {
    /// Create a repository over a connection source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Get the underlying connection source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Insert a task and fill in the identifier the database assigned.
    pub fn insert(&self, mut task: Task) -> Result<Task> {
        let conn = self.source.connect()?;
        conn.execute(
            INSERT_TASK,
            (&task.title, task.finished, task.created_date),
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, title = %task.title, "inserted task");
        task.id = Some(id);
        Ok(task)
    }

    /// All tasks in ascending id order.
    pub fn list_all(&self) -> Result<Vec<Task>> {
        let conn = self.source.connect()?;
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let tasks = stmt
            .query_map([], Task::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = tasks.len(), "listed all tasks");
        Ok(tasks)
    }

    /// Delete every task. Returns how many rows were removed.
    pub fn delete_all(&self) -> Result<usize> {
        let conn = self.source.connect()?;
        let removed = conn.execute(DELETE_ALL, [])?;

        debug!(removed, "deleted all tasks");
        Ok(removed)
    }

    /// Look up a task by id. A missing row is `Ok(None)`.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.source.connect()?;
        let mut stmt = conn.prepare(SELECT_BY_ID)?;
        let mut rows = stmt.query([id])?;

        let task = match rows.next()? {
            Some(row) => Task::from_row(row)?,
            None => {
                debug!(id, "task not found");
                return Ok(None);
            }
        };

        // task_id is the primary key; a second row means the table is not what we expect
        if rows.next()?.is_some() {
            return Err(Error::DuplicateRows(id));
        }

        debug!(id, "fetched task");
        Ok(Some(task))
    }

    /// Tasks that are not finished, in storage order.
    pub fn list_unfinished(&self) -> Result<Vec<Task>> {
        let conn = self.source.connect()?;
        let mut stmt = conn.prepare(SELECT_UNFINISHED)?;
        let tasks = stmt
            .query_map([], Task::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = tasks.len(), "listed unfinished tasks");
        Ok(tasks)
    }

    /// Up to `limit` tasks, most recently created first.
    pub fn list_newest(&self, limit: u32) -> Result<Vec<Task>> {
        let conn = self.source.connect()?;
        let mut stmt = conn.prepare(SELECT_NEWEST)?;
        let tasks = stmt
            .query_map([i64::from(limit)], Task::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(limit, count = tasks.len(), "listed newest tasks");
        Ok(tasks)
    }

    /// Mark a task finished and return it as stored afterwards.
    ///
    /// The update and the read-back are one `UPDATE ... RETURNING` statement,
    /// so a concurrent delete cannot land between them. Fails with
    /// [`Error::FinishTargetNotFound`] when no row has the task's id.
    pub fn finish_task(&self, task: &Task) -> Result<Task> {
        let Some(id) = task.id else {
            return Err(Error::FinishTargetNotFound(None));
        };

        let conn = self.source.connect()?;
        let finished = conn
            .query_row(FINISH_TASK, [id], Task::from_row)
            .optional()?
            .ok_or(Error::FinishTargetNotFound(Some(id)))?;

        debug!(id, "finished task");
        Ok(finished)
    }

    /// Delete a task by id. Deleting a missing id is not an error.
    pub fn delete_by_id(&self, id: i64) -> Result<()> {
        let conn = self.source.connect()?;
        let removed = conn.execute(DELETE_BY_ID, [id])?;

        debug!(id, removed, "deleted task");
        Ok(())
    }
}
