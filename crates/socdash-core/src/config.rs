//! Client configuration from YAML/JSON and the environment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::request::RequestConfig;

/// Environment variable overriding [`ClientConfig::backend_url`].
pub const BACKEND_URL_ENV: &str = "SOCDASH_BACKEND_URL";

/// Environment variable overriding [`ClientConfig::base_prefix`].
pub const BASE_PREFIX_ENV: &str = "SOCDASH_BASE_PREFIX";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_BASE_PREFIX: &str = "/api";

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Settings for a resilient client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port of the REST backend
    pub backend_url: String,

    /// Path segment prepended to every endpoint path
    pub base_prefix: String,

    /// Request timeout; `None` leaves requests unbounded
    #[serde(with = "humantime_opt", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,

    /// Extra headers added to every request
    pub headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            base_prefix: DEFAULT_BASE_PREFIX.to_string(),
            timeout: None,
            headers: BTreeMap::new(),
        }
    }
}

mod humantime_opt {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_str(&humantime::format_duration(*d).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

impl ClientConfig {
    /// Parse a config from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, choosing the format by extension (`.json` or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file without validating it.
    ///
    /// For callers that layer further overrides on top and validate once at
    /// the end.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        tracing::debug!(path = %path.display(), json = is_json, "Loading client config");

        let config = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        Ok(config)
    }

    /// Apply `SOCDASH_*` environment overrides, then re-validate.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production),
    /// then re-validate.
    pub fn with_overrides_from(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = self.apply_overrides_from(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` without validating.
    pub fn apply_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            self.backend_url = url;
        }
        if let Some(prefix) = lookup(BASE_PREFIX_ENV) {
            self.base_prefix = prefix;
        }
        self
    }

    /// Default request configuration with the configured extra headers applied.
    pub fn request_defaults(&self) -> RequestConfig {
        RequestConfig::default().with_extra_headers(&self.headers)
    }

    /// Check the config is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "backend_url must start with http:// or https://, got '{}'",
                self.backend_url
            )));
        }

        if !self.base_prefix.is_empty() && !self.base_prefix.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "base_prefix must be empty or start with '/', got '{}'",
                self.base_prefix
            )));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ValidationError(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
