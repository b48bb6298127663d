//! Command-line driver.
//!
//! Each subcommand calls exactly one repository operation and prints the
//! result.

pub mod output;

use crate::config::Config;
use crate::core::{Task, TaskRepository};
use crate::db::{Schema, SqliteSource};
use crate::error::{Error, Result};
use chrono::{Local, NaiveDateTime, SubsecRound};
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Debug, Parser)]
#[command(name = "taskrepo")]
#[command(about = "Store and query tasks in a SQLite table")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the task table if it does not exist
    Init,

    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Mark the task finished from the start
        #[arg(long)]
        finished: bool,
        /// Creation time (YYYY-MM-DD HH:MM:SS), defaults to now
        #[arg(long, value_parser = parse_created)]
        created: Option<NaiveDateTime>,
    },

    /// List all tasks by id
    List,

    /// Show task details
    Show {
        /// Task ID
        id: i64,
    },

    /// List tasks that are not finished
    Unfinished,

    /// List the most recently created tasks
    Newest {
        /// How many tasks to show
        count: u32,
    },

    /// Mark a task finished
    Finish {
        /// Task ID
        id: i64,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },

    /// Delete every task
    Clear,
}

/// Parse a creation timestamp given on the command line.
pub fn parse_created(s: &str) -> Result<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| Error::InvalidTimestamp(s.to_string()))
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let repo = TaskRepository::new(SqliteSource::new(cli.config.source_config()));
    let json = cli.json;

    match cli.command {
        Commands::Init => cmd_init(&repo, json),
        Commands::Add {
            title,
            finished,
            created,
        } => cmd_add(&repo, title, finished, created, json),
        Commands::List => print_tasks(&repo.list_all()?, json),
        Commands::Show { id } => cmd_show(&repo, id, json),
        Commands::Unfinished => print_tasks(&repo.list_unfinished()?, json),
        Commands::Newest { count } => print_tasks(&repo.list_newest(count)?, json),
        Commands::Finish { id } => cmd_finish(&repo, id, json),
        Commands::Delete { id } => {
            repo.delete_by_id(id)?;
            if json {
                println!("{}", json!({ "deleted_id": id }));
            } else {
                println!("Deleted task #{id}");
            }
            Ok(())
        }
        Commands::Clear => {
            let removed = repo.delete_all()?;
            if json {
                println!("{}", json!({ "deleted": removed }));
            } else {
                println!("Deleted {removed} task(s)");
            }
            Ok(())
        }
    }
}

fn cmd_init(repo: &TaskRepository<SqliteSource>, json: bool) -> Result<()> {
    Schema::ensure_with(repo.source())?;

    let path = repo.source().path().display().to_string();
    if json {
        println!("{}", json!({ "initialized": path }));
    } else {
        println!("Initialized task table in {path}");
    }
    Ok(())
}

fn cmd_add(
    repo: &TaskRepository<SqliteSource>,
    title: String,
    finished: bool,
    created: Option<NaiveDateTime>,
    json: bool,
) -> Result<()> {
    let created = created.unwrap_or_else(|| Local::now().naive_local().trunc_subsecs(0));
    let task = repo.insert(Task::new(title, finished, created))?;

    if json {
        println!("{}", output::to_json(&task)?);
    } else if let Some(id) = task.id {
        println!("Created task #{id}: {}", task.title);
    }
    Ok(())
}

fn cmd_show(repo: &TaskRepository<SqliteSource>, id: i64, json: bool) -> Result<()> {
    let task = repo.get_by_id(id)?.ok_or(Error::TaskNotFound(id))?;

    if json {
        println!("{}", output::to_json(&task)?);
    } else {
        println!("{}", output::format_task_detail(&task));
    }
    Ok(())
}

fn cmd_finish(repo: &TaskRepository<SqliteSource>, id: i64, json: bool) -> Result<()> {
    // Only the id matters to finish_task; the stored row supplies the rest
    let target = Task {
        id: Some(id),
        ..Task::new(String::new(), false, NaiveDateTime::default())
    };
    let task = repo.finish_task(&target)?;

    if json {
        println!("{}", output::to_json(&task)?);
    } else {
        println!("Finished task #{id}: {}", task.title);
    }
    Ok(())
}

fn print_tasks(tasks: &[Task], json: bool) -> Result<()> {
    if json {
        println!("{}", output::to_json(tasks)?);
    } else {
        println!("{}", output::format_task_list(tasks));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_created_space() {
        let parsed = parse_created("2024-06-01 12:30:45").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 30, 45)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_created_iso_with_fraction() {
        let parsed = parse_created("2024-06-01T12:30:45.250").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_milli_opt(12, 30, 45, 250)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_created_invalid() {
        let result = parse_created("yesterday");
        assert!(matches!(result, Err(Error::InvalidTimestamp(_))));
    }

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::try_parse_from([
            "taskrepo",
            "--db",
            "x.db",
            "add",
            "Water plants",
            "--finished",
            "--created",
            "2024-06-01 08:00:00",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                title,
                finished,
                created,
            } => {
                assert_eq!(title, "Water plants");
                assert!(finished);
                assert!(created.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_negative_count() {
        assert!(Cli::try_parse_from(["taskrepo", "newest", "-1"]).is_err());
    }
}
