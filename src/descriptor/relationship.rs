//! Descriptors scoped to the children of one parent in a to-many relationship.

use super::QueryDescriptor;
use crate::entity::Entity;

/// The parent a relationship-scoped query is filtered to, either a loaded
/// instance or just its identifier
#[derive(Debug, Clone, PartialEq)]
pub enum ParentRef<P: Entity> {
    Entity(P),
    Id(P::Id),
}

impl<P: Entity> ParentRef<P> {
    pub fn id(&self) -> &P::Id {
        match self {
            ParentRef::Entity(parent) => parent.id(),
            ParentRef::Id(id) => id,
        }
    }

    pub fn entity(&self) -> Option<&P> {
        match self {
            ParentRef::Entity(parent) => Some(parent),
            ParentRef::Id(_) => None,
        }
    }
}

/// A query over the children of a parent entity, e.g. the line items of one order.
///
/// When no parent is bound the result set is empty by definition, whatever the
/// other predicates say; the executor then issues no queries at all.
/// Implementations are expected to include an equality predicate against
/// [`parent_id`](Self::parent_id) in `build_predicates`.
pub trait RelationshipQueryDescriptor: QueryDescriptor {
    type Parent: Entity;

    fn parent(&self) -> Option<&ParentRef<Self::Parent>>;

    fn set_parent(&mut self, parent: Option<ParentRef<Self::Parent>>);

    fn parent_id(&self) -> Option<&<Self::Parent as Entity>::Id> {
        self.parent().map(ParentRef::id)
    }

    fn has_parent(&self) -> bool {
        self.parent().is_some()
    }
}
