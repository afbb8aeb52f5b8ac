//! Store and logging configuration.
//!
//! # Responsibility
//! - Merge defaults, an optional TOML file and `ROSTER_*` environment
//!   variables into one `StoreConfig`.
//! - Turn the resolved values into a `StoreLocation`.
//!
//! # Invariants
//! - `db_path` is never empty after `load`.
//! - Later sources override earlier ones: defaults < TOML < environment.

use crate::db::StoreLocation;
use crate::logging::default_log_level;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default SQLite file name for the member store.
pub const DEFAULT_DB_PATH: &str = "MemberManagement.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const ENV_PREFIX: &str = "ROSTER_";

#[derive(Debug)]
pub enum ConfigError {
    Extract(Box<figment::Error>),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extract(err) => write!(f, "failed to extract configuration: {err}"),
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Extract(err) => Some(err.as_ref()),
            Self::Invalid(_) => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Extract(Box::new(value))
    }
}

/// Resolved settings for the member store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite file holding `member` and the content tables.
    pub db_path: PathBuf,
    /// Busy timeout applied to every opened connection.
    pub busy_timeout_ms: u64,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Builds the layered figment; a missing TOML file is skipped.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(StoreConfig::default()));
        if let Some(path) = config_file.filter(|path| path.is_file()) {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads and checks configuration.
    ///
    /// # Errors
    /// - `Extract` when a source cannot be parsed into `StoreConfig`.
    /// - `Invalid` when `db_path` is empty.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(config_file).extract()?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("db_path must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn store_location(&self) -> StoreLocation {
        StoreLocation::new(self.db_path.clone())
            .with_busy_timeout(Duration::from_millis(self.busy_timeout_ms))
    }
}
