//! # Query Engine
//!
//! Owns a store and the engine configuration, and runs descriptors against
//! them. Executors can also be built directly; the engine only saves callers
//! from threading the configured page-size ceiling through every call.

use crate::config::QueryEngineConfig;
use crate::descriptor::{QueryDescriptor, QueryState, RelationshipQueryDescriptor};
use crate::error::QueryResult;
use crate::executor::{PagedResult, RelationshipQueryExecutor, StructuredQueryExecutor};
use crate::persistence::{Persistence, PgStore};
use tracing::info;

#[derive(Debug)]
pub struct QueryEngine<S> {
    store: S,
    config: QueryEngineConfig,
}

impl<S> QueryEngine<S> {
    pub fn new(store: S, config: QueryEngineConfig) -> QueryResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn with_defaults(store: S) -> Self {
        Self {
            store,
            config: QueryEngineConfig::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &QueryEngineConfig {
        &self.config
    }

    /// Fresh descriptor state using the configured default page size
    pub fn new_state(&self) -> QueryState {
        QueryState::new(self.config.paging.default_page_size)
    }

    pub async fn execute<D>(&self, descriptor: &mut D) -> QueryResult<PagedResult<D::Entity>>
    where
        D: QueryDescriptor,
        S: Persistence<D::Entity>,
    {
        StructuredQueryExecutor::new(&self.store, descriptor)
            .with_max_page_size(self.config.paging.max_page_size)
            .execute()
            .await
    }

    pub async fn execute_related<D>(
        &self,
        descriptor: &mut D,
    ) -> QueryResult<PagedResult<D::Entity>>
    where
        D: RelationshipQueryDescriptor,
        S: Persistence<D::Entity>,
    {
        RelationshipQueryExecutor::new(&self.store, descriptor)
            .with_max_page_size(self.config.paging.max_page_size)
            .execute()
            .await
    }
}

impl QueryEngine<PgStore> {
    /// Open a connection pool from the database section and wrap it
    pub async fn connect(config: QueryEngineConfig) -> QueryResult<Self> {
        config.validate()?;
        let store = PgStore::connect(&config.database).await?;
        info!(
            max_connections = config.database.max_connections,
            max_page_size = config.paging.max_page_size,
            "Query engine connected"
        );
        Ok(Self { store, config })
    }
}
