//! Test doubles shared by the unit tests of this crate.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use github_client::{Organization, Repository, RepositoryProvider, RepositoryScope, User};
use url::Url;

/// In-memory `RepositoryProvider` that records the scopes it is asked for.
pub(crate) struct FakeProvider {
    pub organizations: Vec<Organization>,
    pub user_repositories: Vec<Repository>,
    pub organization_repositories: Vec<Repository>,
    pub fail_authentication: bool,
    pub requested_scopes: Mutex<Vec<RepositoryScope>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            organizations: Vec::new(),
            user_repositories: Vec::new(),
            organization_repositories: Vec::new(),
            fail_authentication: false,
            requested_scopes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_organizations(mut self, logins: &[&str]) -> Self {
        self.organizations = logins
            .iter()
            .enumerate()
            .map(|(i, login)| Organization {
                id: i as u64 + 1,
                login: login.to_string(),
            })
            .collect();
        self
    }

    pub fn scopes(&self) -> Vec<RepositoryScope> {
        self.requested_scopes.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryProvider for FakeProvider {
    async fn get_authenticated_user(&self) -> Result<User, github_client::Error> {
        if self.fail_authentication {
            return Err(github_client::Error::AuthError("Bad credentials".to_string()));
        }
        Ok(User {
            id: 1,
            login: "octocat".to_string(),
        })
    }

    async fn list_organizations(
        &self,
        _user: &User,
    ) -> Result<Vec<Organization>, github_client::Error> {
        Ok(self.organizations.clone())
    }

    async fn list_repositories(
        &self,
        scope: &RepositoryScope,
    ) -> Result<Vec<Repository>, github_client::Error> {
        self.requested_scopes.lock().unwrap().push(scope.clone());
        match scope {
            RepositoryScope::AuthenticatedUser => Ok(self.user_repositories.clone()),
            RepositoryScope::Organization(_) => Ok(self.organization_repositories.clone()),
        }
    }
}

pub(crate) fn repository(full_name: &str, pushed_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Repository {
    Repository::new(
        full_name.to_string(),
        Url::parse(&format!("https://github.com/{full_name}")).unwrap(),
        pushed_at,
        updated_at,
    )
}
