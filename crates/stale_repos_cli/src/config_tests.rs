use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();

    assert!(config.github.api_url.is_none());
    assert_eq!(config.archive.scratch_dir, PathBuf::from("/tmp/git_archive"));
    assert_eq!(config.archive.clone_helper, PathBuf::from("./clone.sh"));
}

#[test]
fn test_app_config_load_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("stale-repos.toml");
    fs::write(
        &config_path,
        "[github]\napi_url = \"https://github.example.com/api/v3\"\n",
    )
    .expect("Failed to write config");

    let config = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(
        config.github.api_url.as_deref(),
        Some("https://github.example.com/api/v3")
    );
    assert_eq!(config.archive, ArchiveConfig::default());
}

#[test]
fn test_app_config_load_archive_section() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("stale-repos.toml");
    fs::write(
        &config_path,
        "[archive]\nscratch_dir = \"/var/tmp/staging\"\nclone_helper = \"/opt/clone\"\n",
    )
    .expect("Failed to write config");

    let config = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(config.archive.scratch_dir, PathBuf::from("/var/tmp/staging"));
    assert_eq!(config.archive.clone_helper, PathBuf::from("/opt/clone"));
    assert!(config.github.api_url.is_none());
}

#[test]
fn test_app_config_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("invalid_config.toml");

    fs::write(&config_path, "invalid = toml = syntax").expect("Failed to write invalid TOML");

    let result = AppConfig::load(&config_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Failed to parse configuration file"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_wrong_value_type() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("stale-repos.toml");

    fs::write(&config_path, "[archive]\nscratch_dir = 42\n").expect("Failed to write config");

    let result = AppConfig::load(&config_path);

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_app_config_load_nonexistent_file() {
    let nonexistent_path = PathBuf::from("nonexistent_config.toml");
    let result = AppConfig::load(&nonexistent_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Configuration file not found"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_load_or_default_requires_explicit_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.toml");

    let result = AppConfig::load_or_default(Some(&missing));

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_load_or_default_reads_explicit_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(&config_path, "[archive]\nclone_helper = \"/opt/clone\"\n")
        .expect("Failed to write config");

    let config = AppConfig::load_or_default(Some(&config_path)).expect("Failed to load config");

    assert_eq!(config.archive.clone_helper, PathBuf::from("/opt/clone"));
}

#[test]
fn test_app_config_load_full_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("stale-repos.toml");
    fs::write(
        &config_path,
        r#"
[github]
api_url = "https://github.example.com/api/v3"

[archive]
scratch_dir = "/var/tmp/staging"
clone_helper = "./clone.sh"
"#,
    )
    .expect("Failed to write config");

    let loaded_config = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(
        loaded_config,
        AppConfig {
            github: GitHubConfig {
                api_url: Some("https://github.example.com/api/v3".to_string()),
            },
            archive: ArchiveConfig {
                scratch_dir: PathBuf::from("/var/tmp/staging"),
                clone_helper: PathBuf::from("./clone.sh"),
            },
        }
    );
}

#[test]
fn test_default_config_path_is_in_current_directory() {
    let result = default_config_path();
    let expected = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_CONFIG_FILENAME);
    assert_eq!(result, expected);
}
