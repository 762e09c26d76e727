//! Configuration management
//!
//! Loads the ss3 configuration file. The file is stored in TOML format at
//! `$SS3_CONFIG_DIR/config.toml`, or `ss3/config.toml` under the platform
//! config directory. A missing file means defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backend::{BackendConfig, DEFAULT_MAX_ATTEMPTS, StaticCredentials};
use crate::error::{Error, Result};
use crate::pager::DEFAULT_PAGE_SIZE;

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "SS3_CONFIG_DIR";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Browsing behaviour
    #[serde(default)]
    pub defaults: Defaults,

    /// Backend connection settings
    #[serde(default)]
    pub aws: AwsSettings,
}

/// Browsing behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Show the newest child timestamp next to folders
    #[serde(default)]
    pub folder_timestamps: bool,

    /// Directory downloads are written to
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Color mode: "auto", "always", or "never"
    #[serde(default = "default_color")]
    pub color: String,
}

/// Backend connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwsSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// S3-compatible endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// SDK retry attempts per request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    #[serde(default)]
    pub force_path_style: bool,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_color() -> String {
    "auto".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            folder_timestamps: false,
            download_dir: default_download_dir(),
            color: default_color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            aws: AwsSettings::default(),
        }
    }
}

impl Config {
    /// Build the backend configuration described by the `[aws]` table
    pub fn backend_config(&self) -> Result<BackendConfig> {
        let credentials = match (&self.aws.access_key, &self.aws.secret_key) {
            (Some(access_key), Some(secret_key)) => Some(StaticCredentials {
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
            }),
            (None, None) => None,
            _ => {
                return Err(Error::Config(
                    "access_key and secret_key must be set together".into(),
                ));
            }
        };

        let config = BackendConfig {
            region: self.aws.region.clone(),
            profile: self.aws.profile.clone(),
            endpoint: self.aws.endpoint.clone(),
            credentials,
            max_attempts: self.aws.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            force_path_style: self.aws.force_path_style,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration manager handles locating and loading config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("ss3"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade ss3.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }
}
