//! Configuration management for Askdoc
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{AskdocError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Askdoc
///
/// Holds everything needed to reach the document service and shape the
/// interactive session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Document service connection settings
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Document service configuration
///
/// The remote service exposes the ingestion and query endpoints; both are
/// resolved relative to `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the document service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for a single ingestion or query request (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AskdocError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| AskdocError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("ASKDOC_SERVICE_URL") {
            self.service.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("ASKDOC_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.service.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid ASKDOC_TIMEOUT_SECONDS: {}", timeout);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.service.base_url = endpoint.clone();
            tracing::debug!("Using service endpoint override: {}", endpoint);
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is empty or unparseable, or if the
    /// request timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.service.base_url.is_empty() {
            return Err(
                AskdocError::Config("service.base_url cannot be empty".to_string()).into(),
            );
        }

        if url::Url::parse(&self.service.base_url).is_err() {
            return Err(AskdocError::Config(format!(
                "Invalid service.base_url: {}",
                self.service.base_url
            ))
            .into());
        }

        if self.service.timeout_seconds == 0 {
            return Err(AskdocError::Config(
                "service.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
