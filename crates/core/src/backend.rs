//! Backend configuration, regions and AWS profiles
//!
//! The S3 client is always built from an explicit `BackendConfig`.
//! Switching region or profile produces a new config and a new client;
//! nothing is written back to the process environment.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default number of attempts the SDK makes per request
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Regions of the `aws` and `aws-us-gov` partitions
pub const KNOWN_REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-southeast-5",
    "ap-southeast-7",
    "ca-central-1",
    "ca-west-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "mx-central-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "us-gov-east-1",
    "us-gov-west-1",
];

/// Static access key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key: String,
    pub secret_key: String,
}

/// Everything needed to build a storage client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Region override; `None` defers to the SDK default chain
    pub region: Option<String>,

    /// Named profile; `None` defers to `AWS_PROFILE` / default
    pub profile: Option<String>,

    /// Custom S3-compatible endpoint
    pub endpoint: Option<String>,

    /// Static credentials instead of the profile chain
    pub credentials: Option<StaticCredentials>,

    /// Attempts per request, including the first
    pub max_attempts: u32,

    /// Use path-style bucket addressing
    pub force_path_style: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            endpoint: None,
            credentials: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            force_path_style: false,
        }
    }
}

impl BackendConfig {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Check the settings the SDK would otherwise reject late
    pub fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            url::Url::parse(endpoint)?;
        }
        if self.max_attempts == 0 {
            return Err(Error::Config("max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

/// The profile in effect for `config`, if any
pub fn current_profile(config: &BackendConfig) -> Option<String> {
    config
        .profile
        .clone()
        .or_else(|| std::env::var("AWS_PROFILE").ok())
        .filter(|p| !p.is_empty())
}

/// Shared credentials file (`AWS_SHARED_CREDENTIALS_FILE` or `~/.aws/credentials`)
pub fn credentials_file() -> Option<PathBuf> {
    std::env::var_os("AWS_SHARED_CREDENTIALS_FILE")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".aws").join("credentials")))
}

/// Shared config file (`AWS_CONFIG_FILE` or `~/.aws/config`)
pub fn config_file() -> Option<PathBuf> {
    std::env::var_os("AWS_CONFIG_FILE")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".aws").join("config")))
}

/// Profiles named in a credentials file and a config file, first seen first
pub fn list_profiles(credentials: Option<&Path>, config: Option<&Path>) -> Result<Vec<String>> {
    let existing: Vec<&Path> = [credentials, config]
        .into_iter()
        .flatten()
        .filter(|p| p.exists())
        .collect();

    if existing.is_empty() {
        return Err(Error::MissingCredentials(
            "No credentials file found. Ensure the AWS CLI is installed and run `aws configure`."
                .into(),
        ));
    }

    let mut profiles: Vec<String> = Vec::new();
    for path in existing {
        let content = std::fs::read_to_string(path)?;
        for name in parse_profile_names(&content) {
            if !profiles.contains(&name) {
                profiles.push(name);
            }
        }
    }
    Ok(profiles)
}

/// Section names of an INI-style AWS file.
///
/// The config file spells sections `[profile name]`; the prefix is dropped.
pub fn parse_profile_names(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
            let name = inner.strip_prefix("profile ").unwrap_or(inner).trim();
            (!name.is_empty() && !name.starts_with("sso-session")).then(|| name.to_string())
        })
        .collect()
}
