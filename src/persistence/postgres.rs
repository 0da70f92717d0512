//! PostgreSQL persistence over a `sqlx` pool.
//!
//! Statements are rendered by [`QueryBuilder`] and executed with runtime
//! binding. The hydration statement may return one row per joined child;
//! rows are folded back into one entity per identity, in row order.

use super::{CountQuery, HydrationQuery, IdentifierQuery, Persistence};
use crate::config::DatabaseConfig;
use crate::entity::Entity;
use crate::error::{DataAccessError, QueryResult};
use crate::query_builder::{FetchJoin, QueryBuilder, SqlStatement, SqlValue};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, PgPool, Postgres, Row};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// An entity the PostgreSQL store can hydrate.
///
/// The root row is decoded with `FromRow`; each fetch-joined association is
/// then offered every joined row through [`attach`](Self::attach), reading its
/// columns via [`FetchJoin::column_alias`]. A LEFT join yields NULL columns for
/// parents without children, which `attach` should skip.
pub trait SqlEntity: Entity + for<'r> FromRow<'r, PgRow> + Unpin {
    fn attach(&mut self, _join: &FetchJoin, _row: &PgRow) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

pub struct PgStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStore").field("pool", &"PgPool").finish()
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> QueryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn count_statement(query: &CountQuery) -> Result<SqlStatement, DataAccessError> {
        QueryBuilder::new(query.root.table(), query.root.alias())
            .select_count()
            .where_all(query.predicates.iter().cloned())
            .build(&query.parameters)
            .map_err(|e| DataAccessError::store("render count", e.to_string()))
    }

    pub fn identifier_statement(query: &IdentifierQuery) -> Result<SqlStatement, DataAccessError> {
        let id_path = query.root.id_path();
        QueryBuilder::new(query.root.table(), query.root.alias())
            .select(&[id_path.as_str()])
            .where_all(query.predicates.iter().cloned())
            .order(query.order.clone())
            .paginate(query.window)
            .build(&query.parameters)
            .map_err(|e| DataAccessError::store("render select_identifiers", e.to_string()))
    }

    /// The identifier array is not part of `binds`; it is bound last, as `$n`
    /// with n = binds.len() + 1
    pub fn hydration_statement<E: Entity>(
        query: &HydrationQuery<E>,
    ) -> Result<SqlStatement, DataAccessError> {
        let builder = query
            .fetch
            .joins()
            .iter()
            .cloned()
            .fold(
                QueryBuilder::new(query.root.table(), query.root.alias()),
                QueryBuilder::fetch_join,
            )
            .where_any_of_bound_array(&query.root.id_path())
            .order(query.order.clone());

        builder
            .build(&query.parameters)
            .map_err(|e| DataAccessError::store("render select_by_identifiers", e.to_string()))
    }
}

/// Bind with the PostgreSQL type matching the value's variant
fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &'q SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Bool(b) => query.bind(*b),
        SqlValue::Int(i) => query.bind(*i),
        SqlValue::Float(f) => query.bind(*f),
        SqlValue::Text(s) => query.bind(s.as_str()),
        SqlValue::Uuid(u) => query.bind(*u),
        SqlValue::Timestamp(ts) => query.bind(*ts),
        SqlValue::Date(d) => query.bind(*d),
        SqlValue::Json(v) => query.bind(sqlx::types::Json(v)),
    }
}

fn bind_all<'q>(statement: &'q SqlStatement) -> Query<'q, Postgres, PgArguments> {
    statement
        .binds
        .iter()
        .fold(sqlx::query(&statement.sql), bind_value)
}

#[async_trait]
impl<E> Persistence<E> for PgStore
where
    E: SqlEntity,
    E::Id: for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
    Vec<E::Id>: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres>,
{
    async fn count(&self, query: &CountQuery) -> Result<u64, DataAccessError> {
        let statement = Self::count_statement(query)?;
        debug!(sql = %statement.sql, binds = statement.binds.len(), "count statement");

        let row = bind_all(&statement).fetch_one(&self.pool).await?;
        let count: i64 = row.try_get(0)?;
        u64::try_from(count).map_err(|_| DataAccessError::store("count", format!("negative count {count}")))
    }

    async fn select_identifiers(
        &self,
        query: &IdentifierQuery,
    ) -> Result<Vec<E::Id>, DataAccessError> {
        let statement = Self::identifier_statement(query)?;
        debug!(sql = %statement.sql, binds = statement.binds.len(), "identifier statement");

        let rows = bind_all(&statement).fetch_all(&self.pool).await?;
        let ids = rows
            .iter()
            .map(|row| row.try_get::<E::Id, _>(0))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    async fn select_by_identifiers(
        &self,
        query: &HydrationQuery<E>,
    ) -> Result<Vec<E>, DataAccessError> {
        let statement = Self::hydration_statement(query)?;
        debug!(sql = %statement.sql, ids = query.ids.len(), "hydration statement");

        let rows = bind_all(&statement)
            .bind(query.ids.clone())
            .fetch_all(&self.pool)
            .await?;

        let mut entities: Vec<E> = Vec::with_capacity(query.ids.len());
        let mut positions: HashMap<E::Id, usize> = HashMap::with_capacity(query.ids.len());

        for row in &rows {
            let id: E::Id = row.try_get(E::ID_PROPERTY)?;
            let index = match positions.get(&id) {
                Some(&index) => index,
                None => {
                    entities.push(E::from_row(row)?);
                    positions.insert(id, entities.len() - 1);
                    entities.len() - 1
                }
            };
            for join in query.fetch.joins() {
                entities[index].attach(join, row)?;
            }
        }

        Ok(entities)
    }
}
