//! Client configuration
//!
//! Endpoint and timeout are injected rather than hard-coded so the client can
//! be pointed at a local or mock service.

use crate::{Error, ErrorContext, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://linear-regression-model-aef5.onrender.com";
pub const DEFAULT_PREDICT_PATH: &str = "/api/v1/predict-yield";
pub const DEFAULT_MODEL_INFO_PATH: &str = "/api/v1/model-info";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub predict_path: String,
    pub model_info_path: String,
    /// Applies to the whole exchange: connect, send, and reading the body.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            predict_path: DEFAULT_PREDICT_PATH.to_string(),
            model_info_path: DEFAULT_MODEL_INFO_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// On-disk shape; every key is optional and falls back to the defaults.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    base_url: Option<String>,
    predict_path: Option<String>,
    model_info_path: Option<String>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Defaults, overridden by environment variables:
    ///
    /// - `YIELD_API_BASE_URL`
    /// - `YIELD_PREDICT_PATH`
    /// - `YIELD_MODEL_INFO_PATH`
    /// - `YIELD_HTTP_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("YIELD_API_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(path) = env::var("YIELD_PREDICT_PATH") {
            self.predict_path = path;
        }
        if let Ok(path) = env::var("YIELD_MODEL_INFO_PATH") {
            self.model_info_path = path;
        }
        if let Some(secs) = env::var("YIELD_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }

    /// Load from a YAML document such as:
    ///
    /// ```yaml
    /// base_url: http://localhost:5000
    /// timeout_secs: 10
    /// ```
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let defaults = Self::default();
        let config = Self {
            base_url: file.base_url.unwrap_or(defaults.base_url),
            predict_path: file.predict_path.unwrap_or(defaults.predict_path),
            model_info_path: file.model_info_path.unwrap_or(defaults.model_info_path),
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base URL '{}'", self.base_url),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(e.to_string())
                    .with_source("config_validator"),
            )
        })?;

        for (key, path) in [
            ("config.predict_path", &self.predict_path),
            ("config.model_info_path", &self.model_info_path),
        ] {
            if !path.starts_with('/') {
                return Err(Error::configuration_with_context(
                    format!("endpoint path '{}' must start with '/'", path),
                    ErrorContext::new()
                        .with_field_path(key)
                        .with_source("config_validator"),
                ));
            }
        }

        if self.timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "timeout must be greater than zero",
                ErrorContext::new()
                    .with_field_path("config.timeout")
                    .with_source("config_validator"),
            ));
        }
        Ok(())
    }

    pub fn predict_url(&self) -> String {
        join_url(&self.base_url, &self.predict_path)
    }

    pub fn model_info_url(&self) -> String {
        join_url(&self.base_url, &self.model_info_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
