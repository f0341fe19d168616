//! Configuration for diagnostic presentation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::diagnostics::Severity;

/// Top-level configuration for an extraction pass.
///
/// Overrides re-tag reported severities by diagnostic name. They never
/// change which diagnostics are emitted or which methods are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Per-diagnostic configuration, keyed by diagnostic name.
    #[serde(default)]
    pub diagnostics: HashMap<String, DiagnosticConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Gets the severity override for a diagnostic, if any.
    #[must_use]
    pub fn severity_override(&self, diagnostic_name: &str) -> Option<Severity> {
        self.diagnostics
            .get(diagnostic_name)
            .and_then(|c| c.severity)
    }
}

/// Per-diagnostic configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticConfig {
    /// Severity override for this diagnostic.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
