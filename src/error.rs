//! Error types for the query engine.
//!
//! Failures fall into two classes that callers must be able to tell apart:
//! - [`DataAccessError`] - the persistence capability failed while running a phase
//! - [`ContractViolation`] - the caller handed the engine a descriptor it cannot execute
//!
//! Empty results are never errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Data access error: {0}")]
    DataAccess(#[from] DataAccessError),
    #[error("Contract violation: {0}")]
    Contract(#[from] ContractViolation),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl QueryError {
    /// Only store failures are worth retrying; contract and configuration
    /// faults fail the same way every time.
    pub fn is_retriable(&self) -> bool {
        matches!(self, QueryError::DataAccess(_))
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, QueryError::Contract(_))
    }
}

impl From<sqlx::Error> for QueryError {
    fn from(err: sqlx::Error) -> Self {
        QueryError::DataAccess(DataAccessError::Database(err))
    }
}

impl From<config::ConfigError> for QueryError {
    fn from(err: config::ConfigError) -> Self {
        QueryError::Configuration(err.to_string())
    }
}

/// Failure reported by a persistence capability during phase A, B or C.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{operation} failed: {reason}")]
    Store { operation: String, reason: String },
}

impl DataAccessError {
    pub fn store(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        DataAccessError::Store {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Bad caller usage, detected before any query is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("page size {page_size} is outside 1..={max}")]
    InvalidPageSize { page_size: u64, max: u64 },
    #[error("parameter '{name}' is referenced by a predicate but was never bound")]
    UnboundParameter { name: String },
    #[error("entity '{entity}' has no orderable property '{property}'")]
    UnknownOrderProperty { entity: String, property: String },
    #[error("entity '{entity}' declares no identifier property")]
    EmptyProjection { entity: String },
    #[error("value {value} does not fit a {target} parameter")]
    ValueOutOfRange { value: String, target: &'static str },
}

pub type QueryResult<T> = Result<T, QueryError>;
