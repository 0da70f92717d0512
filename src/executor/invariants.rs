//! Checks and derivations shared by every execution: window validation,
//! parameter coverage, order resolution and identity de-duplication.

use crate::descriptor::{QueryDescriptor, RootContext};
use crate::entity::Entity;
use crate::error::ContractViolation;
use crate::query_builder::{OrderSpec, Parameters, Predicate};
use std::collections::HashSet;

pub fn validate_page_size(page_size: u64, max_page_size: u64) -> Result<(), ContractViolation> {
    if page_size == 0 || page_size > max_page_size {
        return Err(ContractViolation::InvalidPageSize {
            page_size,
            max: max_page_size,
        });
    }
    Ok(())
}

pub fn validate_identity<E: Entity>() -> Result<(), ContractViolation> {
    if E::ID_PROPERTY.is_empty() {
        return Err(ContractViolation::EmptyProjection {
            entity: E::TABLE.to_string(),
        });
    }
    Ok(())
}

/// Every parameter a predicate names must be bound before phase A runs
pub fn check_parameters(
    predicates: &[Predicate],
    params: &Parameters,
) -> Result<(), ContractViolation> {
    for name in predicates.iter().flat_map(Predicate::param_names) {
        params.require(name)?;
    }
    Ok(())
}

/// Ordering used by both the identifier page and the hydrated fetch: the
/// descriptor's custom path, else its named property, else the identity
/// property; always followed by the identity property as tie-breaker.
pub fn resolve_order<D: QueryDescriptor>(
    descriptor: &D,
    root: &RootContext,
) -> Result<OrderSpec, ContractViolation> {
    let path = match descriptor.build_custom_order(root) {
        Some(path) => path,
        None => match descriptor.order_by_property_id() {
            Some(property) if D::Entity::is_property(property) => root.get(property),
            Some(property) => {
                return Err(ContractViolation::UnknownOrderProperty {
                    entity: D::Entity::TABLE.to_string(),
                    property: property.to_string(),
                })
            }
            None => root.id_path(),
        },
    };

    Ok(OrderSpec::with_tie_breaker(
        path,
        descriptor.order_direction(),
        root.id_path(),
    ))
}

/// Keep the first occurrence of each identity, preserving order
pub fn distinct_by_identity<E: Entity>(entities: Vec<E>) -> Vec<E> {
    let mut seen: HashSet<E::Id> = HashSet::with_capacity(entities.len());
    entities
        .into_iter()
        .filter(|entity| seen.insert(entity.id().clone()))
        .collect()
}
