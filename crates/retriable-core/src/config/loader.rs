//! Configuration loader with precedence
//!
//! Loads configuration from the following sources (low to high):
//! 1. Built-in defaults
//! 2. A YAML or JSON file, when a path is given
//! 3. Environment variables (RETRIABLE_* prefix)

use crate::error::{Error, Result};
use crate::types::ReauthConfig;
use camino::Utf8Path;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;

/// Environment variable overriding `operation`
pub const ENV_OPERATION: &str = "RETRIABLE_OPERATION";
/// Environment variable overriding `unauthorized-codes` (comma-separated)
pub const ENV_UNAUTHORIZED_CODES: &str = "RETRIABLE_UNAUTHORIZED_CODES";
/// Environment variable overriding `renewal-failure`
pub const ENV_RENEWAL_FAILURE: &str = "RETRIABLE_RENEWAL_FAILURE";

/// Loads and validates a `ReauthConfig`
#[derive(Debug, Clone, Default)]
pub struct ReauthConfigLoader {
    skip_env: bool,
}

impl ReauthConfigLoader {
    /// Create a loader that honours environment overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore RETRIABLE_* environment variables
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Load configuration from an optional file plus environment overrides
    pub fn load(&self, path: Option<&Utf8Path>) -> Result<ReauthConfig> {
        let mut config = match path {
            Some(p) => Self::load_file(p)?,
            None => ReauthConfig::default(),
        };

        if !self.skip_env {
            config = Self::apply_env_overrides(config)?;
        }

        config.validate()?;
        tracing::debug!(
            operation = %config.operation,
            codes = ?config.unauthorized_codes,
            renewal_failure = ?config.renewal_failure,
            "loaded re-authentication config"
        );
        Ok(config)
    }

    /// Parse configuration from a YAML string, without environment overrides
    pub fn from_yaml_str(content: &str) -> Result<ReauthConfig> {
        let config: ReauthConfig = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Utf8Path) -> Result<ReauthConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        match path.extension() {
            Some("yaml") | Some("yml") => Self::parse_yaml(path, &content),
            Some("json") => Self::parse_json(path, &content),
            _ => Err(Error::unsupported_format(path.as_str())),
        }
    }

    fn parse_yaml<T: DeserializeOwned>(path: &Utf8Path, content: &str) -> Result<T> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    fn parse_json<T: DeserializeOwned>(path: &Utf8Path, content: &str) -> Result<T> {
        serde_json::from_str(content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    fn apply_env_overrides(mut config: ReauthConfig) -> Result<ReauthConfig> {
        if let Ok(val) = env::var(ENV_OPERATION) {
            config.operation = val;
        }

        if let Ok(val) = env::var(ENV_UNAUTHORIZED_CODES) {
            config.unauthorized_codes = val
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<u16>().map_err(|_| {
                        Error::invalid_config(format!(
                            "{} must be a comma-separated list of status codes",
                            ENV_UNAUTHORIZED_CODES
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
        }

        if let Ok(val) = env::var(ENV_RENEWAL_FAILURE) {
            config.renewal_failure = val.parse()?;
        }

        Ok(config)
    }
}
