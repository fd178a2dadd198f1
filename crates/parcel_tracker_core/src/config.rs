//! Process configuration read from environment variables.
//!
//! # Responsibility
//! - Resolve database path and logging setup for executables.
//!
//! # Invariants
//! - Missing variables fall back to defaults; present but blank ones are errors.
//! - The repository itself never reads configuration.

use crate::logging::{default_log_level, LoggingConfig};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "PARCEL_TRACKER_DB";
pub const LOG_LEVEL_VAR: &str = "PARCEL_TRACKER_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "PARCEL_TRACKER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "tracker.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but holds an empty value.
    Blank(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank(var) => write!(f, "environment variable `{var}` is set but empty"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl TrackerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(name) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::Blank(name)),
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };

        Ok(Self {
            db_path: read(DB_PATH_VAR)?
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_VAR)?.unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_VAR)?.map(PathBuf::from),
        })
    }

    /// Logging setup, present only when a log directory is configured.
    pub fn logging(&self) -> Option<LoggingConfig> {
        self.log_dir
            .as_ref()
            .map(|dir| LoggingConfig::new(self.log_level.clone(), dir.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, TrackerConfig, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = TrackerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("tracker.db"));
        assert!(config.log_dir.is_none());
        assert!(config.logging().is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/var/lib/parcels.db"),
            (LOG_LEVEL_VAR, "warn"),
            (LOG_DIR_VAR, " /var/log/parcels "),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/parcels.db"));
        let logging = config.logging().unwrap();
        assert_eq!(logging.level, "warn");
        assert_eq!(logging.log_dir, PathBuf::from("/var/log/parcels"));
    }

    #[test]
    fn blank_variable_is_rejected() {
        let err = TrackerConfig::from_lookup(lookup_from(&[(DB_PATH_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Blank(DB_PATH_VAR));
    }
}
