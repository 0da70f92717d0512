//! # Entities
//!
//! The compile-time type tag every descriptor and executor is parameterized by.
//! Nothing here is discovered at runtime: table, identity property and the set
//! of orderable properties are associated items of the entity type.

use std::fmt::Debug;
use std::hash::Hash;

/// A persistent record with a durable primary key.
///
/// ```rust
/// use pagequery_core::entity::Entity;
///
/// #[derive(Debug, Clone)]
/// struct Customer {
///     id: i64,
///     name: String,
/// }
///
/// impl Entity for Customer {
///     type Id = i64;
///     const TABLE: &'static str = "customers";
///     const PROPERTIES: &'static [&'static str] = &["id", "name"];
///
///     fn id(&self) -> &i64 {
///         &self.id
///     }
/// }
///
/// assert!(Customer::is_property("name"));
/// ```
pub trait Entity: Send + Sync + 'static {
    /// Opaque, comparable primary key
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Table the entity is stored in
    const TABLE: &'static str;

    /// Property holding the primary key
    const ID_PROPERTY: &'static str = crate::constants::DEFAULT_ID_PROPERTY;

    /// Properties a caller may order by through `Ordering::property_id`
    const PROPERTIES: &'static [&'static str];

    fn id(&self) -> &Self::Id;

    fn is_property(name: &str) -> bool {
        name == Self::ID_PROPERTY || Self::PROPERTIES.contains(&name)
    }
}
