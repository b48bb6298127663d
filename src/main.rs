use clap::Parser;
use std::process;
use taskrepo::cli::{self, Cli};

fn main() {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
