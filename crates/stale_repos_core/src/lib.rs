//! # Stale Repos Core
//!
//! This crate finds GitHub repositories that have seen no activity for a given
//! time and reports or archives them.
//!
//! ## Overview
//!
//! A run is a single pass through four stages:
//! 1. List the repositories of the authenticated user or of one of their
//!    organizations ([`lister`])
//! 2. Keep the repositories whose last push/update is older than an
//!    [`AgeThreshold`], least recently active first ([`filter`])
//! 3. Print one summary line per repository and optionally write a CSV
//!    report ([`report`])
//! 4. Optionally clone every repository and bundle the clones into a
//!    `.tar.gz` archive ([`archive`])
//!
//! Stages 3 and 4 consume the same filtered and sorted list.
//!
//! ## Examples
//!
//! ```no_run
//! use chrono::Utc;
//! use github_client::{create_token_client, GitHubClient};
//! use secrecy::SecretString;
//! use stale_repos_core::{run, AgeThreshold, StaleRepositoryRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = SecretString::from("ghp_example".to_string());
//! let client = GitHubClient::new(create_token_client(&token, None)?);
//!
//! let request = StaleRepositoryRequest {
//!     org_id: Some("my-organization".to_string()),
//!     threshold: AgeThreshold::parse("6 months")?,
//!     csv_path: None,
//!     archive: None,
//! };
//!
//! let report = run(&client, &request, Utc::now(), &mut std::io::stdout()).await?;
//! println!("{} stale repositories", report.repositories.len());
//! # Ok(())
//! # }
//! ```

use std::{io::Write, path::PathBuf};

use chrono::{DateTime, Utc};
use github_client::{Repository, RepositoryProvider};
use tracing::{info, instrument};

pub mod age;
pub mod archive;
pub mod errors;
pub mod filter;
pub mod lister;
pub mod report;

pub use age::AgeThreshold;
pub use archive::{ArchiveOptions, ArchiveSummary, CloneHelper};
pub use errors::Error;
pub use report::ReportRow;

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// What a run should look at and produce.
#[derive(Debug, Clone, Default)]
pub struct StaleRepositoryRequest {
    /// Organization to inspect. `None` inspects the authenticated user's
    /// repositories.
    pub org_id: Option<String>,
    pub threshold: AgeThreshold,
    /// Where to write the CSV report, if one is wanted.
    pub csv_path: Option<PathBuf>,
    /// How to build the archive, if one is wanted.
    pub archive: Option<ArchiveOptions>,
}

/// The outcome of a run.
#[derive(Debug, Clone)]
pub struct StaleRepositoryReport {
    /// The stale repositories, least recently active first.
    pub repositories: Vec<Repository>,
    pub rows: Vec<ReportRow>,
    pub archive: Option<ArchiveSummary>,
}

/// Runs the whole pipeline once.
///
/// The summary lines are written to `out`. `now` is the reference time for
/// both the age filter and the day counts of the report.
///
/// # Errors
///
/// Returns `Error::OrganizationNotFound` before anything is written when the
/// requested organization does not exist for the user. Request, CSV and
/// archive failures are returned as they occur.
#[instrument(skip(provider, request, out), fields(org_id = ?request.org_id, threshold = %request.threshold))]
pub async fn run<W: Write>(
    provider: &dyn RepositoryProvider,
    request: &StaleRepositoryRequest,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<StaleRepositoryReport, Error> {
    let repositories = lister::list_repositories(provider, request.org_id.as_deref()).await?;
    let listed = repositories.len();

    let stale = filter::select_stale(repositories, now, request.threshold);
    info!(
        listed = listed,
        stale = stale.len(),
        "Filtered repositories by age"
    );

    let rows = report::build_rows(&stale, now);
    report::print_summary(&rows, out)?;

    if let Some(path) = &request.csv_path {
        report::write_csv(&rows, path)?;
    }

    let archive = match &request.archive {
        Some(options) => Some(archive::archive_repositories(&stale, options).await?),
        None => None,
    };

    Ok(StaleRepositoryReport {
        repositories: stale,
        rows,
        archive,
    })
}
