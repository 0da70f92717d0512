//! # Executors
//!
//! - [`StructuredQueryExecutor`] - count, identifier page, hydrated fetch
//! - [`RelationshipQueryExecutor`] - the same, short-circuited when no parent is bound
//! - [`invariants`] - window/parameter/order checks and identity de-duplication
//!
//! Phases run strictly in sequence on the calling task: the identifier page is
//! only requested once the count is known to be positive, and the hydrated
//! fetch only once identifiers exist.

pub mod invariants;
pub mod relationship;
pub mod result;
pub mod structured;

pub use relationship::RelationshipQueryExecutor;
pub use result::PagedResult;
pub use structured::StructuredQueryExecutor;
