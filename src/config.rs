//! Runtime configuration for the command-line driver.
//!
//! Every setting is a flag with an environment variable fallback and a
//! default, resolved by clap.

use crate::db::SourceConfig;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the database file.
pub const DB_ENV: &str = "TASKREPO_DB";

/// Environment variable for the busy timeout in milliseconds.
pub const BUSY_TIMEOUT_ENV: &str = "TASKREPO_BUSY_TIMEOUT_MS";

/// Database settings shared by all subcommands.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Path to the SQLite database file
    #[arg(long, global = true, env = DB_ENV, default_value = "tasks.db")]
    pub db: PathBuf,

    /// How long to wait on a locked database, in milliseconds
    #[arg(long, global = true, env = BUSY_TIMEOUT_ENV, default_value_t = 5000)]
    pub busy_timeout_ms: u64,
}

impl Config {
    /// Connection settings derived from this configuration.
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            path: self.db.clone(),
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
            create: true,
        }
    }
}
