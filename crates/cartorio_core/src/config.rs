//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Describe logging, storage, status policy and demo seeding settings.
//! - Load them from `CARTORIO_*` environment variables with defaults.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Malformed values are reported, never silently ignored.

use crate::logging::default_log_level;
use crate::service::StatusPolicy;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "CARTORIO_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CARTORIO_LOG_DIR";
pub const ENV_DB_PATH: &str = "CARTORIO_DB_PATH";
pub const ENV_STRICT_STATUS: &str = "CARTORIO_STRICT_STATUS";
pub const ENV_SEED_DEMO: &str = "CARTORIO_SEED_DEMO";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    /// Rotating log files go here; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StorageConfig {
    /// Process-local storage, lost on exit.
    #[default]
    Memory,
    Sqlite { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub status_policy: StatusPolicy,
    /// Insert demo users and appointments into empty stores.
    pub seed_demo_data: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            storage: StorageConfig::default(),
            status_policy: StatusPolicy::default(),
            seed_demo_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for {key}; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }
        config.logging.log_dir = get(ENV_LOG_DIR).map(PathBuf::from);
        if let Some(path) = get(ENV_DB_PATH) {
            config.storage = StorageConfig::Sqlite {
                path: PathBuf::from(path),
            };
        }
        if let Some(value) = get(ENV_STRICT_STATUS) {
            config.status_policy = if parse_bool(ENV_STRICT_STATUS, &value)? {
                StatusPolicy::Enforced
            } else {
                StatusPolicy::Unconstrained
            };
        }
        if let Some(value) = get(ENV_SEED_DEMO) {
            config.seed_demo_data = parse_bool(ENV_SEED_DEMO, &value)?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            expected: "a boolean (1|0|true|false|yes|no|on|off)",
        }),
    }
}
