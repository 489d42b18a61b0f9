//! Configuration management for the stale-repos CLI.
//!
//! This module provides functionality for loading the optional
//! configuration file of the stale-repos CLI. The file holds settings that
//! rarely change between runs: the GitHub API location and how archives are
//! staged.
//!
//! The configuration is stored in TOML format and can be loaded from a
//! specified file path or from the default location in the current directory.
//! Command-line arguments always take precedence over configured values.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use stale_repos_core::archive::{DEFAULT_CLONE_HELPER, DEFAULT_SCRATCH_DIR};
use tracing::debug;

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "stale-repos.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the stale-repos CLI application.
///
/// # Example TOML Configuration
///
/// ```toml
/// [github]
/// api_url = "https://github.example.com/api/v3"
///
/// [archive]
/// scratch_dir = "/var/tmp/git_archive"
/// clone_helper = "/usr/local/bin/clone.sh"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// GitHub API settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Archive staging settings
    #[serde(default)]
    pub archive: ArchiveConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if:
    /// - The specified file does not exist
    /// - The file cannot be read due to permissions or I/O issues
    /// - The file contains invalid TOML syntax or unknown value types
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use stale_repos_cli::config::AppConfig;
    ///
    /// let config_path = Path::new("./stale-repos.toml");
    /// match AppConfig::load(config_path) {
    ///     Ok(config) => println!("Scratch directory: {:?}", config.archive.scratch_dir),
    ///     Err(e) => eprintln!("Failed to load config: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration for a run.
    ///
    /// An explicitly requested file must exist. When no file is requested the
    /// default file in the current directory is used if present, and the
    /// built-in defaults otherwise.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, Error> {
        match config_path {
            Some(path) => Self::load(path),
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::load(&path)
                } else {
                    debug!("No configuration file at {:?}, using defaults", path);
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Configuration for reaching the GitHub API.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct GitHubConfig {
    /// Base URL of the REST API, for GitHub Enterprise Server installations.
    ///
    /// When absent the public `https://api.github.com` endpoint is used.
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Configuration for staging clones while building an archive.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Directory the clones are written to before being archived.
    #[serde(default = "ArchiveConfig::default_scratch_dir")]
    pub scratch_dir: PathBuf,

    /// Program invoked as `<clone_helper> <url> <destination>` for every
    /// repository.
    #[serde(default = "ArchiveConfig::default_clone_helper")]
    pub clone_helper: PathBuf,
}

impl ArchiveConfig {
    fn default_scratch_dir() -> PathBuf {
        PathBuf::from(DEFAULT_SCRATCH_DIR)
    }

    fn default_clone_helper() -> PathBuf {
        PathBuf::from(DEFAULT_CLONE_HELPER)
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            scratch_dir: ArchiveConfig::default_scratch_dir(),
            clone_helper: ArchiveConfig::default_clone_helper(),
        }
    }
}

/// Path of the configuration file used when none is given.
///
/// This is `./stale-repos.toml` in the current directory, falling back to a
/// relative path if the working directory cannot be determined.
pub fn default_config_path() -> PathBuf {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    current_dir.join(DEFAULT_CONFIG_FILENAME)
}
