//! # Query Builder System
//!
//! SQL composition for the statements a paged execution issues.
//!
//! ## Key Components
//!
//! - [`builder`] - Statement builder rendering SELECT / JOIN / WHERE / ORDER BY / LIMIT-OFFSET
//! - [`conditions`] - Predicates and conditions with literal or named-parameter operands
//! - [`joins`] - Fetch joins declared for eager hydration
//! - [`ordering`] - Order direction, descriptor ordering state and resolved order specs
//! - [`pagination`] - Paging window with navigation helpers
//! - [`parameters`] - Named parameter bag bound by descriptors
//! - [`value`] - Typed bind values, one variant per PostgreSQL parameter type
//!
//! Every value, literal or named, is rendered as a positional placeholder and
//! carried in [`SqlStatement::binds`]; nothing is interpolated into SQL text
//! except identifiers and paths supplied by code.
//!
//! ## Example Usage
//!
//! ```rust
//! use pagequery_core::query_builder::{Parameters, PagingWindow, Predicate, QueryBuilder};
//!
//! let mut params = Parameters::new();
//! params.bind("customer", "acme");
//!
//! let statement = QueryBuilder::new("orders", "root")
//!     .select(&["root.id"])
//!     .where_predicate(Predicate::eq_param("root.customer", "customer"))
//!     .paginate(PagingWindow::new(0, 20))
//!     .build(&params)
//!     .unwrap();
//!
//! assert_eq!(
//!     statement.sql,
//!     "SELECT root.id FROM orders root WHERE root.customer = $1 LIMIT 20 OFFSET 0"
//! );
//! ```

pub mod builder;
pub mod conditions;
pub mod joins;
pub mod ordering;
pub mod pagination;
pub mod parameters;
pub mod value;

pub use builder::{QueryBuilder, SqlStatement, StatementWriter};
pub use conditions::{Condition, LogicalOperator, Operand, Predicate};
pub use joins::{Cardinality, FetchJoin, FetchPlan, JoinType};
pub use ordering::{OrderBy, OrderDirection, OrderSpec, Ordering};
pub use pagination::PagingWindow;
pub use parameters::Parameters;
pub use value::SqlValue;
