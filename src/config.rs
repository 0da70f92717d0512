//! # Engine Configuration
//!
//! Layered loading: built-in defaults, then an optional file (YAML, TOML or
//! JSON by extension), then `PAGEQUERY__<SECTION>__<KEY>` environment variables.
//!
//! ```rust,no_run
//! use pagequery_core::config::QueryEngineConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = QueryEngineConfig::load(Some(Path::new("config/pagequery.yaml")))?;
//! println!("max page size: {}", config.paging.max_page_size);
//! # Ok(())
//! # }
//! ```

use crate::constants::paging::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{QueryError, QueryResult};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "PAGEQUERY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryEngineConfig {
    pub database: DatabaseConfig,
    pub paging: PagingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for QueryEngineConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            paging: PagingConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/pagequery_development".to_string(),
            max_connections: 10,
            acquire_timeout_seconds: 30,
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl QueryEngineConfig {
    /// Defaults, then `path` if it exists, then the environment
    pub fn load(path: Option<&Path>) -> QueryResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the environment only
    pub fn from_env() -> QueryResult<Self> {
        Self::load(None)
    }

    pub fn validate(&self) -> QueryResult<()> {
        if self.database.url.is_empty() {
            return Err(QueryError::Configuration(
                "database.url must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(QueryError::Configuration(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.paging.max_page_size == 0 {
            return Err(QueryError::Configuration(
                "paging.max_page_size must be at least 1".to_string(),
            ));
        }
        if self.paging.default_page_size == 0
            || self.paging.default_page_size > self.paging.max_page_size
        {
            return Err(QueryError::Configuration(format!(
                "paging.default_page_size {} must be within 1..={}",
                self.paging.default_page_size, self.paging.max_page_size
            )));
        }
        Ok(())
    }
}
