//! Resolving which repositories to inspect.

use github_client::{Repository, RepositoryProvider, RepositoryScope};
use tracing::{error, info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "lister_tests.rs"]
mod tests;

/// Lists the repositories of `org_id`, or of the authenticated user when no
/// organization is given.
///
/// The organization must be one the authenticated user is a member of. Its
/// login is compared exactly, including case.
///
/// # Errors
///
/// Returns `Error::OrganizationNotFound` when no membership matches `org_id`,
/// and `Error::GitHub` when a request fails.
#[instrument(skip(provider))]
pub async fn list_repositories(
    provider: &dyn RepositoryProvider,
    org_id: Option<&str>,
) -> Result<Vec<Repository>, Error> {
    let user = provider.get_authenticated_user().await?;

    let scope = match org_id {
        Some(org_id) => {
            let organizations = provider.list_organizations(&user).await?;
            let organization = organizations
                .into_iter()
                .find(|org| org.login == org_id)
                .ok_or_else(|| {
                    error!(
                        org_id = org_id,
                        login = user.login,
                        "Organization is not among the user's memberships"
                    );
                    Error::OrganizationNotFound(org_id.to_string())
                })?;
            RepositoryScope::Organization(organization.login)
        }
        None => RepositoryScope::AuthenticatedUser,
    };

    let repositories = provider.list_repositories(&scope).await?;
    info!(
        scope = %scope,
        count = repositories.len(),
        "Listed repositories"
    );

    Ok(repositories)
}
