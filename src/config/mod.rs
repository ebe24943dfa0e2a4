//! Configuration management for spacewalk.
//!
//! Configuration is read from `~/.config/spacewalk/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. The API endpoint and access token can be overridden through the
//! `SPACEWALK_API_ENDPOINT` and `SPACEWALK_ACCESS_TOKEN` environment
//! variables.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub site: SiteConfig,
    pub comments: CommentsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            site: SiteConfig::default(),
            comments: CommentsConfig::default(),
        }
    }
}

/// Where the content repository lives and how to authenticate against it.
///
/// Always passed explicitly to the client constructor; nothing in the crate
/// reads process-wide state after `Config::load` returns.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Repository API endpoint, e.g. `https://myblog.cdn.prismic.io/api/v2`.
    pub endpoint: String,
    /// Access token for private repositories.
    pub access_token: Option<String>,
    /// Document type articles are stored under.
    pub document_type: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_token: None,
            document_type: "post".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title used in page `<title>` tags and the TUI header.
    pub title: String,
    /// Public base URL of the generated site, used for canonical links.
    pub base_url: String,
    /// Summaries fetched per listing page.
    pub page_size: usize,
    /// Default output directory for `spacewalk build`.
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacewalk".to_string(),
            base_url: String::new(),
            page_size: 10,
            output_dir: PathBuf::from("public"),
        }
    }
}

/// Settings for the third-party comment widget embedded on article pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// GitHub repository comments are filed against. Empty disables the embed.
    pub repo: String,
    /// How comments are correlated with pages.
    pub issue_term: String,
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            issue_term: "pathname".to_string(),
            theme: "github-dark".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default().with_env_overrides());
        }

        Self::load_file(&config_path)
    }

    /// Load configuration from an explicit path, falling back to the default
    /// path when none is given.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_file(p),
            None => Self::load(),
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("SPACEWALK_API_ENDPOINT") {
            self.api.endpoint = endpoint;
        }
        if let Ok(token) = std::env::var("SPACEWALK_ACCESS_TOKEN") {
            self.api.access_token = Some(token);
        }
        self
    }

    /// Get the default config file path: `~/.config/spacewalk/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("spacewalk").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# spacewalk configuration
#
# The [api] section points at the headless CMS repository the blog is
# served from. The endpoint and access token can also be supplied through
# the SPACEWALK_API_ENDPOINT and SPACEWALK_ACCESS_TOKEN environment
# variables, which take precedence over this file.

[api]
# Repository API endpoint
endpoint = ""

# Access token for private repositories (omit for public ones)
# access_token = ""

# Document type articles are stored under
document_type = "post"

[site]
# Site title, used in page titles and the reader header
title = "spacewalk"

# Public base URL of the generated site (no trailing slash)
base_url = ""

# Number of post summaries fetched per listing page
page_size = 10

# Default output directory for `spacewalk build`
output_dir = "public"

[comments]
# GitHub repository the comment widget files issues against.
# Leave empty to disable the embed.
repo = ""

# How comments are correlated with pages
issue_term = "pathname"

# Widget theme
theme = "github-dark"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl From<ConfigError> for crate::app::SpacewalkError {
    fn from(e: ConfigError) -> Self {
        crate::app::SpacewalkError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.document_type, "post");
        assert_eq!(config.site.page_size, 10);
        assert_eq!(config.comments.issue_term, "pathname");
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[site]
page_size = 2
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        // Custom value
        assert_eq!(config.site.page_size, 2);
        // Default values
        assert_eq!(config.api.document_type, "post");
        assert_eq!(config.site.output_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_empty_config() {
        let content = "";
        let config: Config = toml::from_str(content).expect("Empty config should work");

        assert_eq!(config.site.title, "spacewalk");
        assert!(config.api.access_token.is_none());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r##"
[api]
endpoint = "https://myblog.cdn.example.io/api/v2"
document_type = "article"
"##,
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.api.endpoint, "https://myblog.cdn.example.io/api/v2");
        assert_eq!(config.api.document_type, "article");
    }
}
