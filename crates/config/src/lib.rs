#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for pyndex
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/pyndex/config.toml)
//! - Environment variables (`PYNDEX_*`)
//! - CLI flags (applied by the binary, highest precedence)

use pyndex_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Default simple index queried by the add command
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/simple/";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    /// Owner recorded on saved packages when --owner is not given
    #[serde(default)]
    pub default_owner: Option<String>,
}

/// Package index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_index_url")]
    pub url: String,
    /// Permit plain-http index URLs
    #[serde(default)]
    pub allow_insecure: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: default_index_url(),
            allow_insecure: false,
        }
    }
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64, // seconds
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: 300, // 5 minutes
            connect_timeout: 30,
            retries: 3,
            retry_delay: 1, // 1 second
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Index storage root (default: platform data dir + "pyndex")
    pub root: Option<PathBuf>,
}

// Default value functions for serde
fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

fn default_timeout() -> u64 {
    300 // 5 minutes
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1 // 1 second
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::ReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, the default location, or fall back to
    /// built-in defaults when no file exists
    ///
    /// An explicit path that does not exist is an error; a missing file
    /// at the default location is not.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub async fn load_or_default(explicit: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }

        if let Some(path) = Self::default_path() {
            if path.exists() {
                debug!(path = %path.display(), "loading config file");
                return Self::load(&path).await;
            }
        }

        Ok(Self::default())
    }

    /// Default config file location (~/.config/pyndex/config.toml)
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pyndex").join("config.toml"))
    }

    /// Merge environment variables over file values
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable does not parse.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(url) = std::env::var("PYNDEX_INDEX_URL") {
            self.index.url = url;
        }
        if let Ok(value) = std::env::var("PYNDEX_ALLOW_INSECURE") {
            self.index.allow_insecure =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "PYNDEX_ALLOW_INSECURE".to_string(),
                    message: format!("expected true or false, got {value}"),
                })?;
        }
        if let Ok(root) = std::env::var("PYNDEX_STORAGE_ROOT") {
            self.storage.root = Some(PathBuf::from(root));
        }
        if let Ok(owner) = std::env::var("PYNDEX_DEFAULT_OWNER") {
            self.general.default_owner = Some(owner);
        }
        if let Ok(value) = std::env::var("PYNDEX_NET_TIMEOUT") {
            self.network.timeout = value.parse().map_err(|_| ConfigError::InvalidValue {
                field: "PYNDEX_NET_TIMEOUT".to_string(),
                message: format!("expected seconds, got {value}"),
            })?;
        }
        self.validate()?;
        Ok(())
    }

    /// Resolve the storage root, falling back to the platform data dir
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoStorageRoot` when neither is available.
    pub fn storage_root(&self) -> Result<PathBuf, Error> {
        if let Some(root) = &self.storage.root {
            return Ok(root.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("pyndex"))
            .ok_or_else(|| ConfigError::NoStorageRoot.into())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.index.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "index.url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.network.timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: "network.timeout".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
