//! Fetcher configuration
//!
//! Settings are read from `config.yaml` in the platform config directory
//! (e.g. `~/.config/distro-fetcher/config.yaml` on Linux). A missing file
//! means defaults. Every field is optional:
//!
//! ```yaml
//! url: https://cloud-images.ubuntu.com/releases/streams/v1/com.ubuntu.cloud:released:download.json
//! arch: amd64
//! max_attempts: 5
//! timeout_seconds: 30
//! initial_backoff_seconds: 1
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{RetryPolicy, DEFAULT_ARCH, DEFAULT_CATALOG_URL};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Catalog retrieval and filtering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Catalog document URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Architecture substring matched against `disk1.img` paths
    #[serde(default = "default_arch")]
    pub arch: String,

    /// Total download attempts before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Wait after the first failed attempt; grows linearly after that
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_seconds: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            arch: default_arch(),
            max_attempts: default_max_attempts(),
            timeout_seconds: default_timeout(),
            initial_backoff_seconds: default_initial_backoff(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_arch() -> String {
    DEFAULT_ARCH.to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_timeout() -> u64 {
    30
}

fn default_initial_backoff() -> u64 {
    1
}

impl FetcherConfig {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                tracing::debug!("No config directory available; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config {} not found; using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Self = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Default config file path for this platform
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("io", "distro-fetcher", "distro-fetcher")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| dirs::config_dir().map(|d| d.join("distro-fetcher")))
            .map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Reject settings no download could work with
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            anyhow::bail!("Catalog URL must start with http:// or https://");
        }
        if self.arch.is_empty() {
            anyhow::bail!("Architecture must not be empty");
        }
        Ok(())
    }

    /// Retry policy for catalog downloads
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_secs(self.initial_backoff_seconds),
        }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
