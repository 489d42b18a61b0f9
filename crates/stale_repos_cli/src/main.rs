use std::io;

use clap::Parser;

mod commands;
mod config;

mod errors;
use commands::run_cmd::{execute, RunArgs};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// stale-repos CLI: Find GitHub repositories that have gone quiet
#[derive(Parser)]
#[command(name = "stale-repos", version)]
#[command(about = "Report and archive GitHub repositories with no recent activity", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr, stdout carries the report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_env("STALE_REPOS_LOG"))
        .init();

    let cli = Cli::parse();
    match execute(&cli.run).await {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            let code = e.exit_code();
            if code == 1 {
                println!("{e}");
            } else {
                error!("Error: {e}");
            }
            std::process::exit(code);
        }
    }
}
