//! Console and CSV reporting of stale repositories.

use std::{fs::File, io::Write, path::Path};

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use github_client::Repository;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Column names of the CSV report, in order.
pub const CSV_HEADER: [&str; 6] = [
    "Name",
    "Link",
    "Pushed At",
    "Days Since Push",
    "Updated At",
    "Days Since Update",
];

/// Whole days elapsed between `timestamp` and `now`, rounded down.
///
/// Timestamps in the future give negative counts, rounded towards negative
/// infinity.
pub fn days_since(now: DateTime<Utc>, timestamp: DateTime<Utc>) -> i64 {
    let elapsed = now - timestamp;
    let days = elapsed.num_days();
    if elapsed < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}

/// One line of the report, derived from a repository at a fixed `now`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub link: String,
    pub pushed_at: DateTime<Utc>,
    pub days_since_push: i64,
    pub updated_at: DateTime<Utc>,
    pub days_since_update: i64,
}

impl ReportRow {
    pub fn from_repository(repo: &Repository, now: DateTime<Utc>) -> Self {
        Self {
            name: repo.full_name().to_string(),
            link: repo.html_url().to_string(),
            pushed_at: repo.pushed_at(),
            days_since_push: days_since(now, repo.pushed_at()),
            updated_at: repo.updated_at(),
            days_since_update: days_since(now, repo.updated_at()),
        }
    }

    /// The console form of the row.
    pub fn summary(&self) -> String {
        format!(
            "Name: {}, Pushed: {} days ago, Updated: {} days ago",
            self.name, self.days_since_push, self.days_since_update
        )
    }
}

#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    name: &'a str,
    link: &'a str,
    pushed_at: String,
    days_since_push: i64,
    updated_at: String,
    days_since_update: i64,
}

impl<'a> From<&'a ReportRow> for CsvRecord<'a> {
    fn from(row: &'a ReportRow) -> Self {
        Self {
            name: &row.name,
            link: &row.link,
            pushed_at: row.pushed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            days_since_push: row.days_since_push,
            updated_at: row.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            days_since_update: row.days_since_update,
        }
    }
}

/// Builds the report rows for `repositories`, keeping their order.
pub fn build_rows(repositories: &[Repository], now: DateTime<Utc>) -> Vec<ReportRow> {
    repositories
        .iter()
        .map(|repo| ReportRow::from_repository(repo, now))
        .collect()
}

/// Writes one summary line per row to `out`.
pub fn print_summary<W: Write>(rows: &[ReportRow], out: &mut W) -> Result<(), Error> {
    for row in rows {
        writeln!(out, "{}", row.summary())
            .map_err(|e| Error::io("Failed to write report line", "<output>", e))?;
    }
    Ok(())
}

/// Writes the rows as a CSV file at `path`, replacing any existing file.
///
/// The header row is always written, also when there are no rows.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be created and `Error::Csv` if a
/// record cannot be written.
#[instrument(skip(rows), fields(path = %path.display(), rows = rows.len()))]
pub fn write_csv(rows: &[ReportRow], path: &Path) -> Result<(), Error> {
    debug!("Creating CSV report");

    let file = File::create(path).map_err(|e| Error::io("Failed to create CSV report", path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(CsvRecord::from(row))?;
    }
    writer
        .flush()
        .map_err(|e| Error::io("Failed to flush CSV report", path, e))?;

    info!(path = %path.display(), rows = rows.len(), "CSV report written");
    Ok(())
}
