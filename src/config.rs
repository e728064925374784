use crate::error::{PublishError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working copy
pub const CONFIG_FILE_NAME: &str = "publish.toml";

/// Represents the complete configuration for publish.
///
/// Describes how artifacts are built and which programs upload them.
/// Credentials are never read from this file, see [Credentials].
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub package_index: PackageIndexConfig,
}

/// Returns the default build command: an sdist and a universal wheel.
fn default_build_command() -> Vec<String> {
    [
        "python",
        "setup.py",
        "egg_info",
        "--tag-build=",
        "sdist",
        "bdist_wheel",
        "--universal",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_github_program() -> String {
    "gh".to_string()
}

fn default_twine_program() -> String {
    "twine".to_string()
}

/// Configuration for the build toolchain.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    /// Program and arguments, run from the root of the working copy
    #[serde(default = "default_build_command")]
    pub command: Vec<String>,

    /// Directory the build writes artifacts to, relative to the working copy
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            command: default_build_command(),
            dist_dir: default_dist_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ChangelogConfig {
    #[serde(default)]
    pub include_merge_commits: bool,
}

/// Configuration for the hosting-service release client.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GithubConfig {
    #[serde(default = "default_github_program")]
    pub program: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            program: default_github_program(),
        }
    }
}

/// Configuration for the package-index upload client.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageIndexConfig {
    #[serde(default = "default_twine_program")]
    pub program: String,

    /// Alternative index to upload to instead of the default one
    #[serde(default)]
    pub repository_url: Option<String>,
}

impl Default for PackageIndexConfig {
    fn default() -> Self {
        PackageIndexConfig {
            program: default_twine_program(),
            repository_url: None,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `publish.toml` in the working copy
/// 3. `.publish.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, workdir: &Path) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if workdir.join(CONFIG_FILE_NAME).exists() {
        workdir.join(CONFIG_FILE_NAME)
    } else if let Some(path) = dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
        .filter(|path| path.exists())
    {
        path
    } else {
        log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        return Ok(Config::default());
    };

    log::debug!("Loading configuration from {}", path.display());
    let config_str = fs::read_to_string(&path)
        .map_err(|e| PublishError::config(format!("Cannot read {}: {}", path.display(), e)))?;

    parse_config(&config_str)
        .map_err(|e| PublishError::config(format!("Invalid {}: {}", path.display(), e)))
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(text)
}

/// Upload credentials, captured once when the process starts
///
/// Missing values are only an error when a client asks for them.
#[derive(Clone, Default, PartialEq)]
pub struct Credentials {
    pub github_token: Option<String>,
    pub twine_username: Option<String>,
    pub twine_password: Option<String>,
}

pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const TWINE_USERNAME: &str = "TWINE_USERNAME";
pub const TWINE_PASSWORD: &str = "TWINE_PASSWORD";

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Credentials {
            github_token: get(GITHUB_TOKEN),
            twine_username: get(TWINE_USERNAME),
            twine_password: get(TWINE_PASSWORD),
        }
    }

    pub fn github_token(&self) -> Result<&str> {
        required(&self.github_token, GITHUB_TOKEN)
    }

    pub fn twine_username(&self) -> Result<&str> {
        required(&self.twine_username, TWINE_USERNAME)
    }

    pub fn twine_password(&self) -> Result<&str> {
        required(&self.twine_password, TWINE_PASSWORD)
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| PublishError::config(format!("{} is not set", name)))
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("Credentials")
            .field("github_token", &redact(&self.github_token))
            .field("twine_username", &self.twine_username)
            .field("twine_password", &redact(&self.twine_password))
            .finish()
    }
}
