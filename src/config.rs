use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::changelog::ChangelogLoader;
use crate::domain::TagMessageTemplate;
use crate::error::{ReleaseError, Result};
use crate::github::{ApiEndpoints, RepositorySlug};

/// Represents the complete configuration for gh-release.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_api_url() -> String {
    ApiEndpoints::DEFAULT_API_URL.to_string()
}

fn default_uploads_url() -> String {
    ApiEndpoints::DEFAULT_UPLOADS_URL.to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Which GitHub repository to release from, and how to reach it.
///
/// When `owner`/`name` are unset the slug is read from the URL of `remote`
/// in the local checkout.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub default_branch: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_uploads_url")]
    pub uploads_url: String,
}

impl RepositoryConfig {
    /// Slug from the explicit owner/name pair, if both are configured
    pub fn slug(&self) -> Result<Option<RepositorySlug>> {
        match (&self.owner, &self.name) {
            (Some(owner), Some(name)) => Ok(Some(RepositorySlug::new(owner, name))),
            (None, None) => Ok(None),
            _ => Err(ReleaseError::config(
                "repository.owner and repository.name must be set together",
            )),
        }
    }

    pub fn endpoints(&self) -> ApiEndpoints {
        ApiEndpoints::new(&self.api_url, &self.uploads_url)
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            owner: None,
            name: None,
            remote: default_remote(),
            default_branch: default_branch(),
            api_url: default_api_url(),
            uploads_url: default_uploads_url(),
        }
    }
}

fn default_changelog_path() -> PathBuf {
    PathBuf::from(ChangelogLoader::DEFAULT_PATH)
}

/// Location of the Markdown changelog release notes are taken from.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_path")]
    pub path: PathBuf,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            path: default_changelog_path(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Glob patterns selecting the files uploaded as release assets.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssetsConfig {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        AssetsConfig {
            base_dir: default_base_dir(),
            patterns: Vec::new(),
        }
    }
}

fn default_tag_message() -> String {
    TagMessageTemplate::DEFAULT.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_tag_message")]
    pub tag_message: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            tag_message: default_tag_message(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `ghrelease.toml` in current directory
/// 3. `gh-release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if Path::new("./ghrelease.toml").exists() {
        read_config_file(Path::new("./ghrelease.toml"))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("gh-release.toml");
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| ReleaseError::config(format!("Cannot read {}: {}", path.display(), e)))
}

/// Parses configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReleaseError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.repository.default_branch, "master");
        assert_eq!(config.repository.remote, "origin");
        assert_eq!(config.changelog.path, PathBuf::from("CHANGELOG.md"));
        assert!(config.assets.patterns.is_empty());
        assert_eq!(config.release.tag_message, "Release version {tag}");
        assert!(config.repository.slug().unwrap().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
[repository]
owner = "acme"
name = "widget"
"#,
        )
        .unwrap();
        assert_eq!(
            config.repository.slug().unwrap(),
            Some(RepositorySlug::new("acme", "widget"))
        );
        assert_eq!(config.repository.default_branch, "master");
        assert_eq!(
            config.repository.endpoints(),
            ApiEndpoints::default()
        );
    }

    #[test]
    fn test_half_configured_slug() {
        let config = parse_config("[repository]\nowner = \"acme\"\n").unwrap();
        assert!(config.repository.slug().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            parse_config("[repository\nowner = 1"),
            Err(ReleaseError::Config(_))
        ));
    }
}
