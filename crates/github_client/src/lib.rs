//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for listing the authenticated user, the
//! organizations that user belongs to, and the repositories of either scope.
//! Requests are authenticated with a personal access token.

use async_trait::async_trait;
use octocrab::{Octocrab, Result as OctocrabResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{Organization, Repository, User};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Number of items requested per page. 100 is the maximum GitHub accepts.
const PER_PAGE: u8 = 100;

/// The set of repositories a listing call covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryScope {
    /// Every repository the authenticated user owns, collaborates on, or can
    /// see through an organization membership.
    AuthenticatedUser,

    /// All repositories of the organization with the given login.
    Organization(String),
}

impl std::fmt::Display for RepositoryScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryScope::AuthenticatedUser => write!(f, "authenticated user"),
            RepositoryScope::Organization(login) => write!(f, "organization '{}'", login),
        }
    }
}

/// Read-only access to the users, organizations and repositories of a forge.
///
/// `GitHubClient` is the production implementation. The staleness pipeline only
/// talks to this trait so it can be driven by in-memory fakes in tests.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// Returns the user the client is authenticated as.
    ///
    /// # Errors
    ///
    /// Returns `Error::AuthError` if the credentials are rejected.
    async fn get_authenticated_user(&self) -> Result<User, Error>;

    /// Lists the organizations the given (authenticated) user is a member of.
    ///
    /// # Errors
    ///
    /// Returns an error if any page of the listing cannot be retrieved.
    async fn list_organizations(&self, user: &User) -> Result<Vec<Organization>, Error>;

    /// Lists every repository in the given scope, following pagination until
    /// the last page.
    ///
    /// # Errors
    ///
    /// Returns an error if any page of the listing cannot be retrieved.
    async fn list_repositories(&self, scope: &RepositoryScope) -> Result<Vec<Repository>, Error>;
}

/// Query parameters for one page of a list endpoint.
#[derive(Debug, Serialize)]
struct PageQuery {
    per_page: u8,
    page: u32,
}

/// A client for interacting with the GitHub API, authenticated with a token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an already authenticated octocrab client.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use github_client::{create_token_client, GitHubClient};
    /// use secrecy::SecretString;
    ///
    /// # fn example() -> Result<(), github_client::Error> {
    /// let token = SecretString::from("ghp_example".to_string());
    /// let client = GitHubClient::new(create_token_client(&token, None)?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Fetches every page of a list endpoint.
    ///
    /// Pages are requested one after the other, starting at page 1, until
    /// GitHub returns an empty page.
    async fn get_all_pages<T>(&self, path: &str) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            debug!(path = path, page = page, "Fetching page {} of {}", page, path);

            let query = PageQuery {
                per_page: PER_PAGE,
                page,
            };
            let result: OctocrabResult<Vec<T>> = self.client.get(path, Some(&query)).await;

            match result {
                Ok(batch) => {
                    let count = batch.len();
                    debug!(
                        path = path,
                        page = page,
                        count = count,
                        "Retrieved {} items on page {}",
                        count,
                        page
                    );

                    if count == 0 {
                        debug!(path = path, total_pages = page - 1, "No more pages");
                        break;
                    }

                    items.extend(batch);
                    page += 1;
                }
                Err(e) => {
                    error!(path = path, page = page, "Failed to fetch page");
                    return Err(map_octocrab_error("Failed to list items", e));
                }
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl RepositoryProvider for GitHubClient {
    #[instrument(skip(self))]
    async fn get_authenticated_user(&self) -> Result<User, Error> {
        let result: OctocrabResult<User> = self.client.get("/user", None::<&()>).await;
        match result {
            Ok(user) => {
                info!(login = user.login, "Authenticated with GitHub");
                Ok(user)
            }
            Err(e) => Err(map_octocrab_error("Failed to get the authenticated user", e)),
        }
    }

    #[instrument(skip(self, user), fields(login = %user.login))]
    async fn list_organizations(&self, user: &User) -> Result<Vec<Organization>, Error> {
        let organizations: Vec<Organization> = self.get_all_pages("/user/orgs").await?;

        info!(
            login = user.login,
            count = organizations.len(),
            "Retrieved organization memberships"
        );

        Ok(organizations)
    }

    #[instrument(skip(self), fields(scope = %scope))]
    async fn list_repositories(&self, scope: &RepositoryScope) -> Result<Vec<Repository>, Error> {
        let path = match scope {
            RepositoryScope::AuthenticatedUser => "/user/repos".to_string(),
            RepositoryScope::Organization(login) => format!("/orgs/{}/repos", login),
        };

        let raw: Vec<octocrab::models::Repository> = self.get_all_pages(&path).await?;
        let total = raw.len();

        let mut repositories = Vec::with_capacity(total);
        for repo in raw {
            let name = repo.full_name.clone().unwrap_or_else(|| repo.name.clone());
            match Repository::try_from(repo) {
                Ok(r) => repositories.push(r),
                Err(_) => {
                    warn!(
                        repository = name,
                        "Repository has no push, update or creation timestamp, skipping"
                    );
                }
            }
        }

        info!(
            scope = %scope,
            count = repositories.len(),
            skipped = total - repositories.len(),
            "Retrieved repositories"
        );

        Ok(repositories)
    }
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Arguments
///
/// * `token` - The personal access token.
/// * `api_base` - Optional API base URL, for GitHub Enterprise Server
///   installations. `None` uses `https://api.github.com`.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URL is invalid and `Error::ApiError`
/// if the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &SecretString, api_base: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder().personal_token(token.expose_secret().to_string());

    if let Some(base) = api_base {
        builder = builder.base_uri(base).map_err(|e| {
            error!(api_base = base, error = %e, "Invalid GitHub API base URL");
            Error::AuthError(format!("Invalid GitHub API base URL '{}'", base))
        })?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build Octocrab client with token credentials");
        Error::ApiError()
    })
}

/// Logs an octocrab error and translates it into a crate error.
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = source;
            let status = err.status_code.as_u16();
            error!(
                error_message = err.message.as_str(),
                status = status,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            );

            if status == 429 || err.message.to_lowercase().contains("rate limit") {
                Error::RateLimitExceeded
            } else if status == 401 || status == 403 {
                Error::AuthError(err.message)
            } else if status == 404 {
                Error::NotFound
            } else {
                Error::InvalidResponse
            }
        }
        octocrab::Error::UriParse { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. Failed to parse URI.",
                message
            );
            Error::ApiError()
        }
        octocrab::Error::Uri { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}, Failed to parse URI.",
                message
            );
            Error::ApiError()
        }
        octocrab::Error::Serde { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The response body could not be deserialized.",
                message,
            );
            Error::InvalidResponse
        }
        octocrab::Error::Json { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                path = source.path().to_string(),
                backtrace = backtrace.to_string(),
                "{}. The response body could not be deserialized.",
                message,
            );
            Error::InvalidResponse
        }
        octocrab::Error::InvalidUtf8 { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The message wasn't valid UTF-8.",
                message,
            );
            Error::InvalidResponse
        }
        _ => {
            error!(error_message = e.to_string(), message);
            Error::ApiError()
        }
    }
}
