//! Age filtering and ordering of repositories.

use chrono::{DateTime, Utc};
use github_client::Repository;
use tracing::debug;

use crate::age::AgeThreshold;

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

/// Lazily yields the repositories whose last activity is strictly older than
/// `now - threshold`.
///
/// A repository whose last activity lies exactly `threshold` before `now` is
/// not yielded.
pub fn older_than<I>(
    repositories: I,
    now: DateTime<Utc>,
    threshold: AgeThreshold,
) -> impl Iterator<Item = Repository>
where
    I: IntoIterator<Item = Repository>,
{
    let period = threshold.as_duration();
    repositories.into_iter().filter(move |repo| {
        let idle = now - repo.last_activity();
        let keep = idle > period;
        if !keep {
            debug!(
                repository = repo.full_name(),
                last_activity = %repo.last_activity(),
                "Repository is too recent, skipping"
            );
        }
        keep
    })
}

/// Filters `repositories` by age and sorts the survivors by last activity,
/// least recently active first.
///
/// The relative order of repositories with the same last activity is not
/// specified.
pub fn select_stale<I>(repositories: I, now: DateTime<Utc>, threshold: AgeThreshold) -> Vec<Repository>
where
    I: IntoIterator<Item = Repository>,
{
    let mut stale: Vec<Repository> = older_than(repositories, now, threshold).collect();
    stale.sort_unstable_by_key(Repository::last_activity);
    stale
}
