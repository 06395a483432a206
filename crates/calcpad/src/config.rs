//! Widget configuration
//!
//! Configuration types for the calculator host, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{DEFAULT_PRECISION, ERROR_TEXT, MAX_PRECISION};
use crate::theme::DEFAULT_THEME_KEY;

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config is not valid JSON for [`CalcpadConfig`]
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    /// Config parsed but a value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the calculator widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcpadConfig {
    /// Decimal places kept when rounding results
    pub precision: u32,
    /// Text shown after a division by zero
    pub error_text: String,
    /// Preference slot holding the theme
    pub theme_key: String,
}

impl Default for CalcpadConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            error_text: ERROR_TEXT.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

impl CalcpadConfig {
    /// Create a new builder
    #[must_use]
    pub fn builder() -> CalcpadConfigBuilder {
        CalcpadConfigBuilder::default()
    }

    /// Parses and validates a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "precision {} exceeds {MAX_PRECISION}",
                self.precision
            )));
        }
        if self.error_text.is_empty() {
            return Err(ConfigError::Invalid("error_text must not be empty".into()));
        }
        if self.theme_key.is_empty() {
            return Err(ConfigError::Invalid("theme_key must not be empty".into()));
        }
        Ok(())
    }
}

/// Builder for `CalcpadConfig`
#[derive(Debug, Clone, Default)]
pub struct CalcpadConfigBuilder {
    config: CalcpadConfig,
}

impl CalcpadConfigBuilder {
    /// Set rounding precision
    #[must_use]
    pub fn precision(mut self, places: u32) -> Self {
        self.config.precision = places;
        self
    }

    /// Set the division-by-zero text
    #[must_use]
    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.config.error_text = text.into();
        self
    }

    /// Set the theme preference slot
    #[must_use]
    pub fn theme_key(mut self, key: impl Into<String>) -> Self {
        self.config.theme_key = key.into();
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<CalcpadConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
