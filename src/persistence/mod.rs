//! # Persistence Capability
//!
//! The store the executor delegates to. It receives fully composed
//! specifications (predicates, order, window, fetch plan, parameters) and
//! answers with a count, a page of identifiers, or hydrated entities. The
//! executor never looks inside; [`postgres::PgStore`] is the bundled
//! implementation.

pub mod postgres;

pub use postgres::{PgStore, SqlEntity};

use crate::descriptor::RootContext;
use crate::entity::Entity;
use crate::error::DataAccessError;
use crate::query_builder::{FetchPlan, OrderSpec, PagingWindow, Parameters, Predicate};
use async_trait::async_trait;
use std::sync::Arc;

/// Phase A: how many rows match
#[derive(Debug, Clone)]
pub struct CountQuery {
    pub root: RootContext,
    pub predicates: Vec<Predicate>,
    pub parameters: Parameters,
}

/// Phase B: which identifiers fall in the window
#[derive(Debug, Clone)]
pub struct IdentifierQuery {
    pub root: RootContext,
    pub predicates: Vec<Predicate>,
    pub parameters: Parameters,
    pub order: OrderSpec,
    pub window: PagingWindow,
}

/// Phase C: the entities behind a page of identifiers, with associations
#[derive(Debug, Clone)]
pub struct HydrationQuery<E: Entity> {
    pub root: RootContext,
    pub ids: Vec<E::Id>,
    pub fetch: FetchPlan,
    pub order: OrderSpec,
    pub parameters: Parameters,
}

#[async_trait]
pub trait Persistence<E: Entity>: Send + Sync {
    async fn count(&self, query: &CountQuery) -> Result<u64, DataAccessError>;

    async fn select_identifiers(
        &self,
        query: &IdentifierQuery,
    ) -> Result<Vec<E::Id>, DataAccessError>;

    /// Rows for identifiers deleted since phase B are simply missing
    async fn select_by_identifiers(
        &self,
        query: &HydrationQuery<E>,
    ) -> Result<Vec<E>, DataAccessError>;
}

#[async_trait]
impl<E, S> Persistence<E> for Arc<S>
where
    E: Entity,
    S: Persistence<E> + ?Sized,
{
    async fn count(&self, query: &CountQuery) -> Result<u64, DataAccessError> {
        (**self).count(query).await
    }

    async fn select_identifiers(
        &self,
        query: &IdentifierQuery,
    ) -> Result<Vec<E::Id>, DataAccessError> {
        (**self).select_identifiers(query).await
    }

    async fn select_by_identifiers(
        &self,
        query: &HydrationQuery<E>,
    ) -> Result<Vec<E>, DataAccessError> {
        (**self).select_by_identifiers(query).await
    }
}
