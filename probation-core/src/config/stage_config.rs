use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Probation stage configuration.
///
/// The reader delegate is not part of the config: it is a trait object
/// supplied at construction time and has no safe default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Interval before a probated path is promoted to the permanent
    /// blacklist, anchored at the instant it first failed.
    pub expiry_interval: String,
    /// Interval before a probated path is re-checked, anchored at the
    /// previous attempt.
    pub check_interval: String,
    /// Audit log target. `None` disables logging; so does a path that
    /// points at a directory.
    pub log: Option<PathBuf>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            expiry_interval: "START +24 HOUR".to_string(),
            check_interval: "START +15 MINUTE".to_string(),
            log: None,
        }
    }
}

impl StageConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }
}
