//! Output formatting for the CLI.

use crate::core::Task;
use crate::error::{format_task_ref, Result};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a task as a single list line.
pub fn format_task_line(task: &Task) -> String {
    format!(
        "[{}] {} {}  ({})",
        format_id(task.id),
        task.status_char(),
        task.title,
        task.created_date.format(DATE_FORMAT),
    )
}

/// Format the details of a single task.
pub fn format_task_detail(task: &Task) -> String {
    let status = if task.finished { "finished" } else { "open" };
    format!(
        "[{}] {}\nStatus:   {status}\nCreated:  {}",
        format_id(task.id),
        task.title,
        task.created_date.format(DATE_FORMAT),
    )
}

/// Format a list of tasks, one per line.
pub fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks".to_string();
    }
    tasks
        .iter()
        .map(format_task_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a value as pretty JSON.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn format_id(id: Option<i64>) -> String {
    match id {
        Some(id) => format!("#{id}"),
        None => format_task_ref(&None),
    }
}
