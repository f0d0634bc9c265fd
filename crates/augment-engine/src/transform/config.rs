//! Augmentation configuration, loaded from `augment.toml`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::parser::ast::{build, Expression};

/// Name of the configuration file looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "augment.toml";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Engine configuration.
///
/// ```toml
/// disabled = ["Singleton"]
/// log-field = "logger"
/// log-target = "console"
/// anonymous-class-name = "AnonymousClass"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AugmentConfig {
    /// Class markers treated as unrelated decorators.
    pub disabled: Vec<String>,

    /// Name of the generated logger field.
    pub log_field: String,

    /// Expression bound to the logger field, e.g. `console` or `app.logger`.
    pub log_target: String,

    /// Label used for classes without a name.
    pub anonymous_class_name: String,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            disabled: Vec::new(),
            log_field: "log".to_string(),
            log_target: "console".to_string(),
            anonymous_class_name: "AnonymousClass".to_string(),
        }
    }
}

impl AugmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Whether a class marker has been disabled.
    pub fn is_disabled(&self, marker: &str) -> bool {
        self.disabled.iter().any(|d| d == marker)
    }

    /// Expression for the logger target; dotted paths become member accesses.
    pub fn log_target_expression(&self) -> Expression {
        let mut segments = self.log_target.split('.').filter(|s| !s.is_empty());
        let Some(first) = segments.next() else {
            return build::id_expr("console");
        };
        segments.fold(build::id_expr(first), build::member)
    }
}

impl FromStr for AugmentConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
