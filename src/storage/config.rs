//! Configuration handling for the categorizer
//!
//! Settings come from the `[settings]` table of a task manifest, or from a
//! standalone `taskcat.toml`, and can be overridden on the command line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{NameParser, DEFAULT_SEPARATOR};

/// File name looked up next to a manifest when it has no `[settings]` table
pub const CONFIG_FILE_NAME: &str = "taskcat.toml";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Options recognised by the categorizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CategorizerConfig {
    /// Delimiter between name segments
    pub category_separator: String,

    /// Trace every category/member link as it is made
    pub debug: bool,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            category_separator: DEFAULT_SEPARATOR.to_string(),
            debug: false,
        }
    }
}

impl CategorizerConfig {
    /// Creates a config with the given separator and debug tracing off
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            category_separator: separator.into(),
            ..Self::default()
        }
    }

    /// Checks that the settings can be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.category_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "category_separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the name parser for this config
    pub fn parser(&self) -> Result<NameParser, ConfigError> {
        self.validate()?;
        Ok(NameParser::new(self.category_separator.clone()))
    }

    /// Parses a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `taskcat.toml` from `dir`, or the defaults if there is none
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        Self::from_toml(&content).context("Failed to parse config")
    }

    /// Applies command-line overrides
    pub fn apply_overrides(&mut self, separator: Option<&str>, debug: bool) {
        if let Some(separator) = separator {
            self.category_separator = separator.to_string();
        }
        self.debug |= debug;
    }
}
