// tests/config_test.rs
use publish::config::{load_config, Config, Credentials, CONFIG_FILE_NAME};
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.build.command[0], "python");
    assert!(config.build.command.contains(&"bdist_wheel".to_string()));
    assert_eq!(config.build.dist_dir, PathBuf::from("dist"));
    assert_eq!(config.github.program, "gh");
    assert_eq!(config.package_index.program, "twine");
    assert_eq!(config.package_index.repository_url, None);
    assert!(!config.changelog.include_merge_commits);
}

#[test]
fn test_load_from_explicit_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[build]
command = ["make", "dist"]

[changelog]
include_merge_commits = true
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let workdir = TempDir::new().unwrap();
    let config = load_config(Some(temp_file.path()), workdir.path()).unwrap();
    assert_eq!(config.build.command, vec!["make", "dist"]);
    assert!(config.changelog.include_merge_commits);
    assert_eq!(config.github.program, "gh");
}

#[test]
fn test_load_from_working_copy() {
    let workdir = TempDir::new().unwrap();
    std::fs::write(
        workdir.path().join(CONFIG_FILE_NAME),
        "[github]\nprogram = \"/opt/bin/gh\"\n",
    )
    .unwrap();

    let config = load_config(None, workdir.path()).unwrap();
    assert_eq!(config.github.program, "/opt/bin/gh");
}

#[test]
fn test_invalid_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[build\n").unwrap();
    temp_file.flush().unwrap();

    let workdir = TempDir::new().unwrap();
    let err = load_config(Some(temp_file.path()), workdir.path()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error: Invalid"));
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let workdir = TempDir::new().unwrap();
    let missing = workdir.path().join("nope.toml");
    let err = load_config(Some(missing.as_path()), workdir.path()).unwrap_err();
    assert!(err.to_string().contains("Cannot read"));
}

#[test]
#[serial]
fn test_credentials_from_env() {
    std::env::set_var("GITHUB_TOKEN", "ghp_from_env");
    std::env::set_var("TWINE_USERNAME", "__token__");
    std::env::remove_var("TWINE_PASSWORD");

    let credentials = Credentials::from_env();

    std::env::remove_var("GITHUB_TOKEN");
    std::env::remove_var("TWINE_USERNAME");

    assert_eq!(credentials.github_token().unwrap(), "ghp_from_env");
    assert_eq!(credentials.twine_username().unwrap(), "__token__");
    assert!(credentials.twine_password().is_err());
}

#[test]
#[serial]
fn test_credentials_are_captured_once() {
    std::env::set_var("GITHUB_TOKEN", "first");
    let credentials = Credentials::from_env();
    std::env::set_var("GITHUB_TOKEN", "second");

    assert_eq!(credentials.github_token().unwrap(), "first");
    std::env::remove_var("GITHUB_TOKEN");
}
