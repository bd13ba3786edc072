//! Core runtime configuration.
//!
//! # Responsibility
//! - Load [`CoreConfig`] from an optional JSON file.
//! - Apply `WAREHOUSE_*` environment overrides on top of file values.
//!
//! # Invariants
//! - Missing file fields fall back to defaults; unknown file fields are rejected.
//! - Environment overrides win over file values.
//! - Validation runs once, on the merged result.

use crate::db::DEFAULT_BUSY_TIMEOUT;
use crate::logging::{default_log_level, normalize_level};
use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment overrides, e.g. `WAREHOUSE_DB_PATH`.
pub const ENV_PREFIX: &str = "WAREHOUSE_";

const ENV_KEYS: &[&str] = &["db_path", "log_level", "log_dir", "busy_timeout_ms"];
const DEFAULT_DB_PATH: &str = "warehouse.sqlite3";

/// Settings needed to open storage and start logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub busy_timeout_ms: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT.as_millis() as u64,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingFile(PathBuf),
    Extract(Box<figment::Error>),
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFile(path) => write!(f, "config file `{}` not found", path.display()),
            Self::Extract(source) => write!(f, "cannot load config: {source}"),
            Self::InvalidValue { key, value } => write!(f, "invalid value for {key}: `{value}`"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Extract(source) => Some(source.as_ref()),
            Self::MissingFile(_) | Self::InvalidValue { .. } => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(source: figment::Error) -> Self {
        Self::Extract(Box::new(source))
    }
}

impl CoreConfig {
    /// Provider chain: defaults, then the JSON file at `path`, then
    /// `WAREHOUSE_*` environment variables.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Json::file_exact(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS))
    }

    /// Loads the merged configuration. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }
        let config: Self = Self::figment(path).extract()?;
        config.validated()
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if normalize_level(&self.log_level).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "log_level",
                value: self.log_level,
            });
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "db_path",
                value: String::new(),
            });
        }
        Ok(self)
    }
}
