use super::{PagedResult, StructuredQueryExecutor};
use crate::descriptor::RelationshipQueryDescriptor;
use crate::entity::Entity;
use crate::error::QueryResult;
use crate::persistence::Persistence;
use tracing::debug;

/// Executor for queries over the children of one parent.
///
/// With no parent bound the result is empty and the store is never called;
/// otherwise the full two-phase protocol runs.
///
/// Identity and page-size checks run first, so an invalid page size is an
/// error with or without a parent. Parameter coverage is only checked when a
/// parent is bound, since the parent parameter is unbound without one.
pub struct RelationshipQueryExecutor<'a, D, S>
where
    D: RelationshipQueryDescriptor,
    S: Persistence<D::Entity>,
{
    inner: StructuredQueryExecutor<'a, D, S>,
}

impl<'a, D, S> RelationshipQueryExecutor<'a, D, S>
where
    D: RelationshipQueryDescriptor,
    S: Persistence<D::Entity>,
{
    pub fn new(store: &'a S, descriptor: &'a mut D) -> Self {
        Self {
            inner: StructuredQueryExecutor::new(store, descriptor),
        }
    }

    pub fn with_max_page_size(mut self, max_page_size: u64) -> Self {
        self.inner = self.inner.with_max_page_size(max_page_size);
        self
    }

    pub async fn execute(mut self) -> QueryResult<PagedResult<D::Entity>> {
        self.inner.validate_window()?;

        if !self.inner.descriptor.has_parent() {
            debug!(
                entity = %<D::Entity as Entity>::TABLE,
                parent = %<D::Parent as Entity>::TABLE,
                "No parent bound; relationship query is empty"
            );
            self.inner.descriptor.set_result_count(0);
            return Ok(PagedResult::empty());
        }

        self.inner.execute().await
    }
}
