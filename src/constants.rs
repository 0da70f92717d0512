//! # Engine Constants
//!
//! Defaults and identifiers shared by the executor, the SQL builder and the
//! configuration layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Paging defaults applied when no configuration overrides them
pub mod paging {
    pub const DEFAULT_PAGE_SIZE: u64 = 10;
    pub const MAX_PAGE_SIZE: u64 = 500;
}

/// SQL rendering identifiers
pub mod sql {
    /// Alias given to the queried entity's table in every statement
    pub const ROOT_ALIAS: &str = "root";
    /// Separator between a fetch-join alias and its column in hydration rows
    pub const JOIN_COLUMN_SEPARATOR: &str = "__";
}

/// Default identity property when an entity does not override it
pub const DEFAULT_ID_PROPERTY: &str = "id";

/// The three store round trips of a paged execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPhase {
    Count,
    Identifiers,
    Hydrate,
}

impl QueryPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryPhase::Count => "count",
            QueryPhase::Identifiers => "identifiers",
            QueryPhase::Hydrate => "hydrate",
        }
    }
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
