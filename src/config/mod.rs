//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional `reviewhub.toml`
//! in the working directory, then `REVIEWHUB__<SECTION>__<KEY>` environment
//! variables (e.g. `REVIEWHUB__CACHE__PERSISTENT=true`).

use crate::domain::shared::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_FILE: &str = "reviewhub.toml";
pub const ENV_PREFIX: &str = "REVIEWHUB";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub cache: CacheConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub project_id: String,
    /// Informational; requests are not cancelled
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory of the on-disk store when `persistent` is set
    pub directory: PathBuf,
    pub persistent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            project_id: "reviewhub-local".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".reviewhub"),
            persistent: false,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl CacheConfig {
    /// File backing the persistent store
    pub fn file(&self) -> PathBuf {
        self.directory.join("cache.json")
    }
}

impl Config {
    /// Load from `reviewhub.toml` (if present) and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Some(Path::new(DEFAULT_FILE)), None)
    }

    /// Load from an optional file and an explicit environment.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_with(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.page_size == 0 {
            return Err(ConfigError::Invalid("pagination.page_size must be positive".to_string()));
        }
        if self.backend.project_id.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.project_id must not be empty".to_string()));
        }
        Ok(())
    }
}
