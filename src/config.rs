//! Pipeline configuration
//!
//! Loaded from a JSON file. Every field is optional and falls back to its
//! default; the loaded value is validated before use.
//!
//! Error codes:
//! - AERO_CONFIG_IO: the file could not be read
//! - AERO_CONFIG_PARSE: the file is not valid configuration JSON
//! - AERO_CONFIG_INVALID: a field is out of range

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event, Event, Severity};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON did not match the configuration shape
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field value is not allowed
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "AERO_CONFIG_IO",
            ConfigError::Parse(_) => "AERO_CONFIG_PARSE",
            ConfigError::Invalid(_) => "AERO_CONFIG_INVALID",
        }
    }
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for the observed edge pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MutationConfig {
    /// Minimum severity the pipeline emits (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    /// Log a warning when a variable is bound to no uids (default false)
    #[serde(default)]
    pub warn_on_empty_expansion: bool,

    /// Log a warning when one expansion yields more edges than this
    #[serde(default = "default_fanout_warn_threshold")]
    pub fanout_warn_threshold: usize,
}

fn default_log_level() -> Severity {
    Severity::Warn
}

fn default_fanout_warn_threshold() -> usize {
    10_000
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            warn_on_empty_expansion: false,
            fanout_warn_threshold: default_fanout_warn_threshold(),
        }
    }
}

impl MutationConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_json(&content)?;

        log_event(
            config.log_level,
            Severity::Info,
            Event::ConfigLoaded,
            &[
                ("path", &path.display().to_string()),
                ("log_level", config.log_level.as_str()),
            ],
        );

        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: MutationConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fanout_warn_threshold == 0 {
            return Err(ConfigError::Invalid(
                "fanout_warn_threshold must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
