//! Stale repository command module.
//!
//! This module turns the command-line arguments and the optional
//! configuration file into a single run of the core pipeline: list the
//! repositories, keep the stale ones, print them and optionally write a CSV
//! report and an archive of their clones.

use std::{io, path::PathBuf};

use chrono::Utc;
use clap::Args;
use github_client::{create_token_client, GitHubClient};
use secrecy::SecretString;
use stale_repos_core::{
    AgeThreshold, ArchiveOptions, CloneHelper, StaleRepositoryReport, StaleRepositoryRequest,
};
use tracing::{debug, info};

use crate::{config::AppConfig, errors::Error};

#[cfg(test)]
#[path = "run_cmd_tests.rs"]
mod run_cmd_tests;

/// Command-line arguments for a run.
///
/// Arguments provided on the command line override the corresponding values
/// from the configuration file.
#[derive(Args, Clone)]
pub struct RunArgs {
    /// GitHub personal access token used for every API request.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Organization whose repositories are inspected.
    ///
    /// Must be an organization the token's user is a member of. When absent
    /// the user's own repositories are inspected.
    #[arg(long = "org_id")]
    pub org_id: Option<String>,

    /// Minimum inactivity, e.g. "6 months" or "1 year 2 weeks".
    #[arg(long = "older_than", default_value = "")]
    pub older_than: String,

    /// Write a .tar.gz archive with a clone of every stale repository.
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Write a CSV report of the stale repositories.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the clones are staged in while archiving.
    ///
    /// Must not exist yet or be empty. It is removed once the archive has
    /// been written.
    #[arg(long = "scratch_dir")]
    pub scratch_dir: Option<PathBuf>,

    /// Program invoked as `<clone_helper> <url> <destination>` per repository.
    #[arg(long = "clone_helper")]
    pub clone_helper: Option<PathBuf>,
}

/// Builds the pipeline request from the arguments and the configuration.
///
/// # Errors
///
/// Returns `Error::Core` if the `--older_than` expression cannot be parsed.
pub fn build_request(args: &RunArgs, config: &AppConfig) -> Result<StaleRepositoryRequest, Error> {
    let threshold = AgeThreshold::parse(&args.older_than)?;
    debug!(threshold = %threshold, "Parsed age threshold");

    let archive = args.archive.as_ref().map(|destination| ArchiveOptions {
        destination: destination.clone(),
        scratch_dir: args
            .scratch_dir
            .clone()
            .unwrap_or_else(|| config.archive.scratch_dir.clone()),
        clone_helper: CloneHelper::new(
            args.clone_helper
                .clone()
                .unwrap_or_else(|| config.archive.clone_helper.clone()),
        ),
    });

    Ok(StaleRepositoryRequest {
        org_id: args.org_id.clone(),
        threshold,
        csv_path: args.csv.clone(),
        archive,
    })
}

/// Runs the stale repository command against the GitHub API.
///
/// Summary lines are printed to standard output.
///
/// # Errors
///
/// Returns `Error::InvalidArguments` for an empty token, `Error::Config` when
/// the configuration file cannot be used and `Error::Core` for every failure
/// of the run itself.
pub async fn execute(args: &RunArgs) -> Result<StaleRepositoryReport, Error> {
    if args.token.trim().is_empty() {
        return Err(Error::InvalidArguments(
            "--token must not be empty".to_string(),
        ));
    }

    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let request = build_request(args, &config)?;

    let token = SecretString::from(args.token.clone());
    let client = GitHubClient::new(create_token_client(
        &token,
        config.github.api_url.as_deref(),
    )?);

    let report = stale_repos_core::run(&client, &request, Utc::now(), &mut io::stdout()).await?;

    match &report.archive {
        Some(summary) => info!(
            stale = report.repositories.len(),
            archive = ?summary.archive_path,
            launched = summary.launched,
            succeeded = summary.succeeded,
            "Run complete"
        ),
        None => info!(stale = report.repositories.len(), "Run complete"),
    }

    Ok(report)
}
