use std::{io, path::PathBuf};

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised by the staleness pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested organization is not among the authenticated user's
    /// organization memberships.
    ///
    /// Matching is exact and case-sensitive.
    #[error("Organisation with ID {0} not found.")]
    OrganizationNotFound(String),

    /// An age unit keyword appeared in the age expression without a leading
    /// number, or its number does not fit in a duration.
    #[error("Invalid age expression '{expression}': no usable count for unit '{unit}'")]
    InvalidAgeExpression { unit: String, expression: String },

    /// Listing users, organizations or repositories failed.
    #[error("GitHub request failed: {0}")]
    GitHub(#[from] github_client::Error),

    /// The scratch directory for an archive already exists and has content.
    #[error("Scratch directory '{}' already exists and is not empty", .0.display())]
    ScratchDirectoryNotEmpty(PathBuf),

    /// A filesystem operation failed.
    #[error("{context} '{}': {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the CSV report failed.
    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            context,
            path: path.into(),
            source,
        }
    }
}
