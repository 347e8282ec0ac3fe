//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; the proxy service token comes
//! from the `EDGESEER_PROXY_TOKEN` environment variable only.
//!
//! # Example
//!
//! ```no_run
//! use edgeseer::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::analysis::{AnalysisConfig, RateLimitConfig};
use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::proxy::ProxyConfig;
use crate::application::catalog;
use crate::error::{ConfigError, Result};

/// Environment variable holding the proxy service token.
pub const PROXY_TOKEN_ENV: &str = "EDGESEER_PROXY_TOKEN";

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Default provider and model.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Forwarding proxy endpoint and timeout.
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Generation parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Rate-limit state persistence.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Never from the config file.
        config.proxy.service_token = std::env::var(PROXY_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) for files that exist.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }

        catalog::get_model(self.llm.provider, &self.llm.model)?;

        if self.proxy.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "proxy.base_url",
            }
            .into());
        }
        self.proxy_url()?;
        if self.proxy.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "proxy.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.analysis.max_output_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_output_tokens",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        let temperature = self.analysis.temperature;
        if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                field: "analysis.temperature",
                reason: "must be between 0 and 2".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// The proxy base URL, parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparseable or non-HTTP URLs.
    #[allow(clippy::result_large_err)]
    pub fn proxy_url(&self) -> Result<Url> {
        let url = Url::parse(self.proxy.base_url.trim()).map_err(|e| ConfigError::InvalidValue {
            field: "proxy.base_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "proxy.base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        Ok(url)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
