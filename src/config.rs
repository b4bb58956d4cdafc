use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::request::validate_date_format;
use crate::error::{PublishError, Result};

/// File name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "publish.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = "publish-post.toml";

/// Represents the complete configuration for publish-post.
///
/// Contains the site directory layout, version-control client settings, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_drafts_dir() -> String {
    "_drafts".to_string()
}

fn default_posts_dir() -> String {
    "_posts".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d-".to_string()
}

/// Directory names and the date stamp prepended to published posts.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Directory drafts are expected to live in (only used for warnings)
    #[serde(default = "default_drafts_dir")]
    pub drafts_dir: String,

    /// Sibling directory posts are moved into
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,

    /// strftime-style format of the filename prefix
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            drafts_dir: default_drafts_dir(),
            posts_dir: default_posts_dir(),
            date_format: default_date_format(),
        }
    }
}

fn default_program() -> String {
    "git".to_string()
}

fn default_commit_message_prefix() -> String {
    "Publishing new post ".to_string()
}

/// Configuration for the external version-control client.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_commit_message_prefix")]
    pub commit_message_prefix: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            program: default_program(),
            commit_message_prefix: default_commit_message_prefix(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Stop at the first failed version-control step
    #[serde(default)]
    pub stop_on_failure: bool,
}

impl Config {
    /// Reject settings that would produce unusable paths or commands.
    pub fn validate(&self) -> Result<()> {
        let posts_dir = self.layout.posts_dir.trim();
        if posts_dir.is_empty() {
            return Err(PublishError::config("layout.posts_dir must not be empty"));
        }
        if posts_dir.contains('/') || posts_dir.contains('\\') {
            return Err(PublishError::config(format!(
                "layout.posts_dir '{}' must be a single directory name",
                self.layout.posts_dir
            )));
        }

        validate_date_format(&self.layout.date_format).map_err(|e| match e {
            PublishError::Config(msg) => PublishError::config(format!("layout.date_format: {}", msg)),
            other => other,
        })?;

        if self.git.program.trim().is_empty() {
            return Err(PublishError::config("git.program must not be empty"));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `publish.toml` in `base_dir`
/// 3. `publish-post.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded (and validated) or default configuration
/// * `Err` - If a file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>, base_dir: &Path) -> Result<Config> {
    let local = base_dir.join(LOCAL_CONFIG_FILE);

    let config_str = if let Some(path) = config_path {
        read_config_file(path)?
    } else if local.exists() {
        read_config_file(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            read_config_file(&user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| PublishError::config(format!("invalid TOML: {}", e)))?;
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "reading configuration");
    fs::read_to_string(path).map_err(|e| {
        PublishError::config(format!("cannot read '{}': {}", path.display(), e))
    })
}
