//! # Models
//!
//! Plain value records returned by the GitHub client.
//!
//! They are built from the octocrab types and carry only the fields the
//! staleness report and the archiver read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::Error;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitHub organization the authenticated user belongs to.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Organization;
///
/// let org = Organization {
///     id: 42,
///     login: "my-organization".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// The unique numeric ID of the organization
    pub id: u64,
    /// The login of the organization, as used in API paths
    pub login: String,
}

/// Represents a GitHub repository together with its activity timestamps.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use github_client::models::Repository;
/// use url::Url;
///
/// let repo = Repository::new(
///     "owner/my-repo".to_string(),
///     Url::parse("https://github.com/owner/my-repo").unwrap(),
///     Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
/// );
///
/// assert_eq!(repo.full_name(), "owner/my-repo");
/// assert_eq!(repo.last_activity(), repo.updated_at());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    full_name: String,
    html_url: Url,
    pushed_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Repository {
    /// Creates a new Repository instance.
    pub fn new(
        full_name: String,
        html_url: Url,
        pushed_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            full_name,
            html_url,
            pushed_at,
            updated_at,
        }
    }

    /// Returns the full name of the repository (owner/name).
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the web URL of the repository.
    pub fn html_url(&self) -> &Url {
        &self.html_url
    }

    /// Returns the time of the most recent push.
    pub fn pushed_at(&self) -> DateTime<Utc> {
        self.pushed_at
    }

    /// Returns the time the repository was last updated.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the later of the push and update timestamps.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.pushed_at.max(self.updated_at)
    }
}

impl TryFrom<octocrab::models::Repository> for Repository {
    type Error = Error;

    /// Converts an octocrab repository.
    ///
    /// GitHub leaves `pushed_at` empty for repositories that never received a
    /// push. Each missing timestamp falls back to the other one and then to
    /// `created_at`. A repository without any of the three is rejected.
    fn try_from(value: octocrab::models::Repository) -> Result<Self, Self::Error> {
        let full_name = value.full_name.unwrap_or_else(|| value.name.clone());

        let pushed_at = value
            .pushed_at
            .or(value.updated_at)
            .or(value.created_at)
            .ok_or(Error::InvalidResponse)?;
        let updated_at = value
            .updated_at
            .or(value.pushed_at)
            .or(value.created_at)
            .ok_or(Error::InvalidResponse)?;

        let html_url = match value.html_url {
            Some(url) => url,
            None => Url::parse(&format!("https://github.com/{}", full_name))
                .map_err(|_| Error::InvalidResponse)?,
        };

        Ok(Self {
            full_name,
            html_url,
            pushed_at,
            updated_at,
        })
    }
}

/// Represents a GitHub user account.
///
/// # Examples
///
/// ```rust
/// use github_client::models::User;
///
/// let user = User {
///     id: 12345,
///     login: "octocat".to_string(),
/// };
///
/// println!("User: {} (ID: {})", user.login, user.id);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// The unique numeric ID of the user
    pub id: u64,
    /// The login name of the user
    pub login: String,
}
