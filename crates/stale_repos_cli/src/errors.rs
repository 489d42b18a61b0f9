use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the stale-repos CLI application.
///
/// This enum represents all possible error conditions that can arise while
/// turning command-line input into a run and executing it.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or parsing configuration.
    ///
    /// This error is returned when there are issues with the configuration file,
    /// such as invalid values, invalid TOML or file access problems.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The run itself failed.
    ///
    /// Wraps every failure reported by the core pipeline, including the
    /// organization lookup, GitHub requests, CSV writing and archiving.
    #[error(transparent)]
    Core(#[from] stale_repos_core::Error),

    /// Invalid command-line arguments were provided.
    ///
    /// This error is returned when the user provides arguments that parse but
    /// cannot be used, such as an empty token.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl From<github_client::Error> for Error {
    fn from(e: github_client::Error) -> Self {
        Error::Core(e.into())
    }
}

impl Error {
    /// The process exit code this error should terminate the program with.
    ///
    /// A missing organization exits with `1`; everything else exits with `2`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Core(stale_repos_core::Error::OrganizationNotFound(_)) => 1,
            _ => 2,
        }
    }
}
