//! # Query Descriptors
//!
//! The caller-supplied side of an execution. A descriptor says *what* to
//! query (predicates, ordering, fetch joins, parameters) and carries the paging
//! window plus the total count computed by the last execution.
//!
//! Descriptors are implemented once per query type and dispatched statically;
//! the entity type is the associated [`QueryDescriptor::Entity`].
//!
//! ## Example
//!
//! ```rust
//! use pagequery_core::descriptor::{QueryDescriptor, QueryState, RootContext};
//! use pagequery_core::entity::Entity;
//! use pagequery_core::query_builder::{Parameters, Predicate};
//!
//! #[derive(Debug, Clone)]
//! struct Order {
//!     id: i64,
//! }
//!
//! impl Entity for Order {
//!     type Id = i64;
//!     const TABLE: &'static str = "orders";
//!     const PROPERTIES: &'static [&'static str] = &["placed_on"];
//!
//!     fn id(&self) -> &i64 {
//!         &self.id
//!     }
//! }
//!
//! struct OpenOrders {
//!     state: QueryState,
//!     region: Option<String>,
//! }
//!
//! impl QueryDescriptor for OpenOrders {
//!     type Entity = Order;
//!
//!     fn state(&self) -> &QueryState {
//!         &self.state
//!     }
//!
//!     fn state_mut(&mut self) -> &mut QueryState {
//!         &mut self.state
//!     }
//!
//!     fn build_predicates(&self, root: &RootContext) -> Vec<Predicate> {
//!         let mut predicates = vec![Predicate::is_null(&root.get("closed_at"))];
//!         if self.region.is_some() {
//!             predicates.push(Predicate::eq_param(&root.get("region"), "region"));
//!         }
//!         predicates
//!     }
//!
//!     fn bind_parameters(&self, params: &mut Parameters) {
//!         if let Some(region) = &self.region {
//!             params.bind("region", region.as_str());
//!         }
//!     }
//! }
//! ```

pub mod relationship;
pub mod state;

pub use relationship::{ParentRef, RelationshipQueryDescriptor};
pub use state::QueryState;

use crate::constants::sql::ROOT_ALIAS;
use crate::entity::Entity;
use crate::query_builder::{FetchPlan, OrderDirection, Parameters, Predicate};

/// Handle on the queried entity's table inside a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootContext {
    table: &'static str,
    alias: &'static str,
    id_property: &'static str,
}

impl RootContext {
    pub fn of<E: Entity>() -> Self {
        Self {
            table: E::TABLE,
            alias: ROOT_ALIAS,
            id_property: E::ID_PROPERTY,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn alias(&self) -> &'static str {
        self.alias
    }

    /// Qualified path of a root property, e.g. `root.placed_on`
    pub fn get(&self, property: &str) -> String {
        format!("{}.{}", self.alias, property)
    }

    pub fn id_path(&self) -> String {
        self.get(self.id_property)
    }
}

/// Capability set the executor needs from a query type.
///
/// `build_predicates` is called once for the count and once for the identifier
/// page and must return the same predicates both times; it takes `&self` and
/// must not depend on anything but the descriptor's own fields.
pub trait QueryDescriptor: Send {
    type Entity: Entity;

    fn state(&self) -> &QueryState;

    fn state_mut(&mut self) -> &mut QueryState;

    fn build_predicates(&self, root: &RootContext) -> Vec<Predicate>;

    /// Ordering path overriding the property named in the ordering state.
    /// Direction still comes from the ordering state.
    fn build_custom_order(&self, _root: &RootContext) -> Option<String> {
        None
    }

    /// Associations to hydrate on the final entity fetch. Never applied to the
    /// count or identifier statements.
    fn add_fetch_joins(&self, _root: &RootContext, _fetch: &mut FetchPlan) {}

    fn bind_parameters(&self, _params: &mut Parameters) {}

    fn first_result(&self) -> u64 {
        self.state().first_result()
    }

    fn page_size(&self) -> u64 {
        self.state().page_size()
    }

    fn order_by_property_id(&self) -> Option<&str> {
        self.state().ordering.property_id.as_deref()
    }

    fn order_direction(&self) -> OrderDirection {
        self.state().ordering.direction
    }

    fn result_count(&self) -> Option<u64> {
        self.state().result_count()
    }

    fn set_result_count(&mut self, count: u64) {
        self.state_mut().set_result_count(count);
    }
}
