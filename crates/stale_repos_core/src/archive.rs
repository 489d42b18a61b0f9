//! Cloning stale repositories and bundling them into a `.tar.gz` archive.
//!
//! The archive step works in a scratch directory:
//!
//! 1. The scratch directory is created (see [`ScratchDirectory`]).
//! 2. One clone helper process is spawned per repository, each writing into
//!    `<scratch>/<owner>/<name>`. Every process is spawned before any of them
//!    is waited on.
//! 3. Once every process has exited, the scratch directory is written as a
//!    gzip-compressed tar whose root entry is the scratch directory's name.
//! 4. The scratch directory is removed, whether or not the previous steps
//!    succeeded.
//!
//! A clone that fails only leaves an empty or partial directory behind; it
//! never fails the archive.

use std::{
    ffi::OsString,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    process::Stdio,
};

use flate2::{write::GzEncoder, Compression};
use github_client::Repository;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::errors::Error;

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;

/// Scratch directory used when none is configured.
pub const DEFAULT_SCRATCH_DIR: &str = "/tmp/git_archive";

/// Clone helper used when none is configured.
pub const DEFAULT_CLONE_HELPER: &str = "./clone.sh";

/// The external program that clones one repository.
///
/// The helper is invoked as `<program> [args...] <url> <destination>` and is
/// expected to populate `destination` with a clone of the default branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneHelper {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CloneHelper {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments passed before the URL and destination.
    ///
    /// Use this to run a helper through an interpreter, for example a script
    /// that is not executable or lives on a `noexec` mount:
    ///
    /// ```rust
    /// use stale_repos_core::CloneHelper;
    ///
    /// let helper = CloneHelper::new("sh").with_args(["./clone.sh"]);
    /// assert_eq!(helper.program(), std::path::Path::new("sh"));
    /// ```
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, url: &str, destination: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(url)
            .arg(destination)
            .stdin(Stdio::null());
        command
    }
}

impl Default for CloneHelper {
    fn default() -> Self {
        Self::new(DEFAULT_CLONE_HELPER)
    }
}

/// Where and how to build the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Path of the `.tar.gz` file to write.
    pub destination: PathBuf,
    /// Directory the clones are staged in. Removed after archiving.
    pub scratch_dir: PathBuf,
    pub clone_helper: CloneHelper,
}

impl ArchiveOptions {
    /// Options with the default scratch directory and clone helper.
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
            clone_helper: CloneHelper::default(),
        }
    }
}

/// What happened while building an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub archive_path: PathBuf,
    /// Number of repositories a clone was attempted for.
    pub repositories: usize,
    /// Number of helper processes that could be started.
    pub launched: usize,
    /// Number of helper processes that exited successfully.
    pub succeeded: usize,
}

/// A directory that exists for as long as this guard lives.
///
/// The directory (and everything in it) is removed when the guard is dropped,
/// on success and error paths alike. Only new or empty directories are
/// accepted, so the guard never removes files it did not stage.
#[derive(Debug)]
pub struct ScratchDirectory {
    path: PathBuf,
}

impl ScratchDirectory {
    /// Creates the directory, including missing parents. An existing empty
    /// directory is reused.
    ///
    /// # Errors
    ///
    /// Returns `Error::ScratchDirectoryNotEmpty` for an existing directory
    /// that has content, which is left untouched, and `Error::Io` if the
    /// directory cannot be inspected or created.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        match fs::read_dir(&path) {
            Ok(mut entries) => {
                if entries.next().is_some() {
                    warn!(
                        path = %path.display(),
                        "Scratch directory is not empty, refusing to use it"
                    );
                    return Err(Error::ScratchDirectoryNotEmpty(path));
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io("Failed to inspect scratch directory", &path, e)),
        }

        fs::create_dir_all(&path)
            .map_err(|e| Error::io("Failed to create scratch directory", &path, e))?;
        debug!(path = %path.display(), "Scratch directory ready");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDirectory {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed scratch directory"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove scratch directory"
            ),
        }
    }
}

/// Result of the clone fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneOutcome {
    pub launched: usize,
    pub succeeded: usize,
}

/// Clones every repository into `<scratch>/<full name>` and waits for all
/// helper processes to exit.
///
/// All destination directories are created first, then all helpers are
/// started before the first one is awaited. Helper failures,
/// including helpers that cannot be started, are logged and counted but do
/// not produce an error.
///
/// # Errors
///
/// Returns `Error::Io` if a destination directory cannot be created. No
/// helper has been started in that case.
#[instrument(skip(repositories, helper), fields(count = repositories.len(), scratch = %scratch.display()))]
pub async fn clone_repositories(
    repositories: &[Repository],
    scratch: &Path,
    helper: &CloneHelper,
) -> Result<CloneOutcome, Error> {
    // Every destination exists before the first helper starts, so a failure
    // here never leaves a running helper behind.
    let destinations = repositories
        .iter()
        .map(|repo| {
            let destination = scratch.join(repo.full_name());
            fs::create_dir_all(&destination)
                .map_err(|e| Error::io("Failed to create clone destination", &destination, e))?;
            Ok(destination)
        })
        .collect::<Result<Vec<PathBuf>, Error>>()?;

    let mut children = Vec::with_capacity(repositories.len());

    for (repo, destination) in repositories.iter().zip(&destinations) {
        match helper.command(repo.html_url().as_str(), destination).spawn() {
            Ok(child) => {
                debug!(repository = repo.full_name(), "Started clone");
                children.push((repo.full_name(), child));
            }
            Err(e) => warn!(
                repository = repo.full_name(),
                helper = %helper.program().display(),
                error = %e,
                "Failed to start clone helper"
            ),
        }
    }

    let mut outcome = CloneOutcome {
        launched: children.len(),
        succeeded: 0,
    };

    for (name, mut child) in children {
        match child.wait().await {
            Ok(status) if status.success() => {
                debug!(repository = name, "Clone finished");
                outcome.succeeded += 1;
            }
            Ok(status) => warn!(repository = name, status = %status, "Clone helper failed"),
            Err(e) => warn!(repository = name, error = %e, "Failed to wait for clone helper"),
        }
    }

    info!(
        launched = outcome.launched,
        succeeded = outcome.succeeded,
        "All clone helpers have exited"
    );

    Ok(outcome)
}

/// Writes `source` as a gzip-compressed tar at `destination`.
///
/// The archive contains a single root entry named after the last component
/// of `source`. Symbolic links are stored as links.
pub fn write_archive(source: &Path, destination: &Path) -> Result<(), Error> {
    let root = source
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("archive"));

    let file =
        File::create(destination).map_err(|e| Error::io("Failed to create archive", destination, e))?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    builder.follow_symlinks(false);

    builder
        .append_dir_all(&root, source)
        .map_err(|e| Error::io("Failed to add files to archive", destination, e))?;

    let encoder = builder
        .into_inner()
        .map_err(|e| Error::io("Failed to finish archive", destination, e))?;
    encoder
        .finish()
        .map_err(|e| Error::io("Failed to finish archive", destination, e))?;

    Ok(())
}

/// Clones `repositories` and bundles the clones into `options.destination`.
///
/// The scratch directory is removed before this function returns, whatever
/// the outcome.
#[instrument(skip(repositories, options), fields(destination = %options.destination.display()))]
pub async fn archive_repositories(
    repositories: &[Repository],
    options: &ArchiveOptions,
) -> Result<ArchiveSummary, Error> {
    let scratch = ScratchDirectory::acquire(&options.scratch_dir)?;

    let outcome = clone_repositories(repositories, scratch.path(), &options.clone_helper).await?;

    let source = scratch.path().to_path_buf();
    let destination = options.destination.clone();
    tokio::task::spawn_blocking(move || write_archive(&source, &destination))
        .await
        .map_err(|e| Error::io("Archive task failed", &options.destination, io::Error::other(e)))??;

    info!(
        archive = %options.destination.display(),
        repositories = repositories.len(),
        "Archive written"
    );

    Ok(ArchiveSummary {
        archive_path: options.destination.clone(),
        repositories: repositories.len(),
        launched: outcome.launched,
        succeeded: outcome.succeeded,
    })
}
