//! Runtime configuration
//!
//! All operator-tunable values live here, loaded from TOML with built-in
//! defaults matching `defaults.rs`.
//!
//! ## Loading Order
//!
//! 1. `OBSWIRE_CONFIG` environment variable (path to TOML file)
//! 2. `obswire.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The `OBSWIRE_ENDPOINT` environment variable overrides the middleware
//! endpoint regardless of where the rest of the config came from.

pub mod defaults;

use crate::publish::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Root configuration for an obswire deployment.
///
/// Load with `ObswireConfig::load()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObswireConfig {
    /// Middleware connection settings
    #[serde(default)]
    pub middleware: MiddlewareConfig,

    /// Delivery retry behaviour
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// What gets published, and how often
    #[serde(default)]
    pub publish: PublishConfig,
}

/// Middleware connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Middleware gRPC endpoint in `host:port` form.
    ///
    /// Can be overridden by the `OBSWIRE_ENDPOINT` env var or `--endpoint`
    /// CLI flag.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Maximum outbound message size in bytes.
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

fn default_endpoint() -> String {
    defaults::DEFAULT_ENDPOINT.to_string()
}

fn default_max_message_bytes() -> usize {
    defaults::MAX_MESSAGE_BYTES
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

/// Delivery retry behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Same-connection send attempts before reconnecting.
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Reconnect cycles before the publish call is declared failed.
    #[serde(default = "default_reconnect_retries")]
    pub reconnect_retries: u32,

    /// Fixed wait before each retry or reconnect attempt (seconds).
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

fn default_retries() -> u32 {
    defaults::SEND_RETRIES
}

fn default_reconnect_retries() -> u32 {
    defaults::RECONNECT_RETRIES
}

fn default_delay_secs() -> u64 {
    defaults::RETRY_DELAY_SECS
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            reconnect_retries: default_reconnect_retries(),
            delay_secs: default_delay_secs(),
        }
    }
}

impl DeliveryConfig {
    /// Convert into the policy the delivery engine consumes.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            reconnect_retries: self.reconnect_retries,
            delay: Duration::from_secs(self.delay_secs),
        }
    }
}

/// What gets published, and how often.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Element identifier attached to every batch.
    #[serde(default = "default_element_id")]
    pub element_id: i64,

    /// Data source indicator attached to every request.
    #[serde(default = "default_indicator")]
    pub indicator: String,

    /// Seconds between periodic reading publishes.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_element_id() -> i64 {
    defaults::DEFAULT_ELEMENT_ID
}

fn default_indicator() -> String {
    defaults::DEFAULT_INDICATOR.to_string()
}

fn default_interval_secs() -> u64 {
    defaults::PUBLISH_INTERVAL_SECS
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            element_id: default_element_id(),
            indicator: default_indicator(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl ObswireConfig {
    /// Load configuration using the standard search order:
    /// 1. `$OBSWIRE_CONFIG` environment variable
    /// 2. `./obswire.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// After loading, `OBSWIRE_ENDPOINT` (if set) overrides the middleware
    /// endpoint.
    pub fn load() -> Self {
        let mut config = Self::load_from_search_order();

        if let Ok(endpoint) = std::env::var("OBSWIRE_ENDPOINT") {
            if !endpoint.is_empty() {
                config.middleware.endpoint = endpoint;
            }
        }

        config
    }

    fn load_from_search_order() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var("OBSWIRE_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from OBSWIRE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from OBSWIRE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "OBSWIRE_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./obswire.toml
        let local = PathBuf::from("obswire.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./obswire.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./obswire.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No obswire.toml found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse config file {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
}
