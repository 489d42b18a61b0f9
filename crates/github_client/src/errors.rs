//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when listing users,
//! organizations and repositories through the github_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{Error, RepositoryProvider, RepositoryScope};
///
/// match client.list_repositories(&RepositoryScope::AuthenticatedUser).await {
///     Ok(repos) => println!("Found {} repositories", repos.len()),
///     Err(Error::AuthError(msg)) => eprintln!("Authentication failed: {}", msg),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic API request failure.
    ///
    /// Returned when the octocrab client could not be built or a request failed
    /// for a reason that has no more specific variant.
    #[error("API request failed")]
    ApiError(),

    /// Authentication failure.
    ///
    /// This error occurs when the personal access token is rejected (HTTP 401)
    /// or lacks the scopes required to list the requested resources (HTTP 403).
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// The GitHub API returned a response in an unexpected format.
    ///
    /// This covers bodies that are not valid JSON or do not have the expected
    /// shape, as well as unexpected HTTP status codes.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// GitHub answers 404 both for missing resources and for resources the
    /// token is not allowed to see.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
