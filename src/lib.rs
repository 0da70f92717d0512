#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # PageQuery Core
//!
//! Correctly paginated queries over entities with eagerly fetched
//! associations.
//!
//! ## Overview
//!
//! A single `SELECT ... JOIN ... LIMIT/OFFSET` cannot page entities whose
//! one-to-many associations are fetched in the same statement: the join
//! repeats each parent row once per child, so the database window cuts
//! through parents and the count overstates them. PageQuery runs every paged
//! query in three store round trips:
//!
//! 1. **Count** the matching rows over the bare entity, no joins
//! 2. **Identifiers**: page the entity's identity column, ordered and windowed
//! 3. **Hydrate** the chosen identifiers with fetch joins applied, same order
//!
//! ## Module Organization
//!
//! - [`descriptor`] - Caller-implemented query descriptors and paging state
//! - [`executor`] - Structured and relationship-scoped executors
//! - [`persistence`] - Store capability and the PostgreSQL store
//! - [`query_builder`] - SQL composition: predicates, joins, ordering, windows
//! - [`engine`] - Store plus configuration facade
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagequery_core::config::QueryEngineConfig;
//! use pagequery_core::QueryEngine;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! pagequery_core::logging::init_structured_logging();
//!
//! let config = QueryEngineConfig::from_env()?;
//! let engine = QueryEngine::connect(config).await?;
//! let mut state = engine.new_state();
//! state.next_page();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod descriptor;
pub mod engine;
pub mod entity;
pub mod error;
pub mod executor;
pub mod logging;
pub mod persistence;
pub mod query_builder;

pub use config::{DatabaseConfig, PagingConfig, QueryEngineConfig};
pub use constants::QueryPhase;
pub use descriptor::{
    ParentRef, QueryDescriptor, QueryState, RelationshipQueryDescriptor, RootContext,
};
pub use engine::QueryEngine;
pub use entity::Entity;
pub use error::{ContractViolation, DataAccessError, QueryError, QueryResult};
pub use executor::{PagedResult, RelationshipQueryExecutor, StructuredQueryExecutor};
pub use persistence::{
    CountQuery, HydrationQuery, IdentifierQuery, Persistence, PgStore, SqlEntity,
};
