use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TagPattern;
use crate::error::{Result, ShipitError};
use crate::publish::github::DEFAULT_API_URL;

const CONFIG_FILE_NAME: &str = "shipit.toml";

/// Represents the complete configuration for shipit.
///
/// Every field has a default, so an empty file (or no file at all) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote the release tag is pushed to and read from
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Tag naming pattern; must contain `{version}` once
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default)]
    pub github: GitHubConfig,
}

/// Where and how releases are published.
///
/// `owner` and `repo` fall back to the values parsed from the remote URL.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub repo: Option<String>,

    /// Name of the environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    "{version}".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            owner: None,
            repo: None,
            token_env: default_token_env(),
            api_url: default_api_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
            github: GitHubConfig::default(),
        }
    }
}

impl Config {
    /// The validated tag pattern
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(&self.tag_pattern)
    }

    /// Read the API token from the configured environment variable
    pub fn github_token(&self) -> Result<String> {
        match std::env::var(&self.github.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ShipitError::config(format!(
                "Environment variable {} is not set; a GitHub token is required to publish",
                self.github.token_env
            ))),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `shipit.toml` in current directory
/// 3. `shipit/shipit.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Errors
/// A custom path that cannot be read, or any file that does not parse or
/// carries an invalid tag pattern.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => match discover_config() {
            Some(path) => path,
            None => {
                tracing::debug!("no config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    tracing::debug!(path = %path.display(), "loading config");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ShipitError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str)?;
    config.tag_pattern()?;
    Ok(config)
}

fn discover_config() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("shipit").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
