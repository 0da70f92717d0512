//! Two-phase paged execution: count, identifier page, hydrated fetch.
//!
//! Paging a fetch-joined statement directly is unsound: a one-to-many join
//! repeats the parent row per child, so LIMIT/OFFSET cut through parents and
//! COUNT overstates them. The page boundary is therefore computed on a
//! statement with no joins (phase B), and the joins are resolved only for the
//! identifiers already chosen (phase C).

use super::invariants::{
    check_parameters, distinct_by_identity, resolve_order, validate_identity, validate_page_size,
};
use super::PagedResult;
use crate::constants::QueryPhase;
use crate::descriptor::{QueryDescriptor, RootContext};
use crate::entity::Entity;
use crate::error::{DataAccessError, QueryError, QueryResult};
use crate::logging;
use crate::persistence::{CountQuery, HydrationQuery, IdentifierQuery, Persistence};
use crate::query_builder::{FetchPlan, OrderSpec, Parameters, Predicate};
use std::time::Instant;
use tracing::{debug, warn};

/// Everything derived from the descriptor before the first query is issued
struct ExecutionPlan {
    root: RootContext,
    predicates: Vec<Predicate>,
    parameters: Parameters,
    order: OrderSpec,
}

/// Runs one descriptor against one store. Constructed per execution; borrows
/// the descriptor mutably for the duration so its result count cannot be
/// raced by a second execution.
///
/// No page-size ceiling applies unless one is set with
/// [`with_max_page_size`](Self::with_max_page_size); `QueryEngine` sets the
/// configured `paging.max_page_size`.
pub struct StructuredQueryExecutor<'a, D, S>
where
    D: QueryDescriptor,
    S: Persistence<D::Entity>,
{
    pub(super) store: &'a S,
    pub(super) descriptor: &'a mut D,
    pub(super) max_page_size: u64,
}

impl<'a, D, S> StructuredQueryExecutor<'a, D, S>
where
    D: QueryDescriptor,
    S: Persistence<D::Entity>,
{
    pub fn new(store: &'a S, descriptor: &'a mut D) -> Self {
        Self {
            store,
            descriptor,
            max_page_size: u64::MAX,
        }
    }

    pub fn with_max_page_size(mut self, max_page_size: u64) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Checks that need neither predicates nor parameters
    pub(super) fn validate_window(&self) -> QueryResult<()> {
        validate_identity::<D::Entity>()?;
        validate_page_size(self.descriptor.page_size(), self.max_page_size)?;
        Ok(())
    }

    fn prepare(&self) -> QueryResult<ExecutionPlan> {
        self.validate_window()?;

        let root = RootContext::of::<D::Entity>();
        let predicates = self.descriptor.build_predicates(&root);

        let mut parameters = Parameters::new();
        self.descriptor.bind_parameters(&mut parameters);
        check_parameters(&predicates, &parameters)?;

        let order = resolve_order(&*self.descriptor, &root)?;

        Ok(ExecutionPlan {
            root,
            predicates,
            parameters,
            order,
        })
    }

    fn phase_failed(phase: QueryPhase, error: DataAccessError) -> QueryError {
        logging::log_phase_error(D::Entity::TABLE, phase, &error.to_string());
        QueryError::DataAccess(error)
    }

    /// Execute and return the page. The descriptor's result count is updated
    /// as soon as phase A completes, whatever happens afterwards.
    pub async fn execute(mut self) -> QueryResult<PagedResult<D::Entity>> {
        let entity = D::Entity::TABLE;
        let plan = self.prepare()?;
        let window = self.descriptor.state().window;

        // Phase A: count over the bare entity
        let started = Instant::now();
        let total_count = self
            .store
            .count(&CountQuery {
                root: plan.root,
                predicates: plan.predicates.clone(),
                parameters: plan.parameters.clone(),
            })
            .await
            .map_err(|e| Self::phase_failed(QueryPhase::Count, e))?;
        logging::log_query_phase(QueryPhase::Count, entity, total_count, elapsed_ms(started));

        self.descriptor.set_result_count(total_count);

        if total_count == 0 {
            logging::log_execution_summary(entity, window.first_result, window.page_size, 0, 0, 1);
            return Ok(PagedResult::empty());
        }

        // Phase B: identifier page, no joins
        let started = Instant::now();
        let ids = self
            .store
            .select_identifiers(&IdentifierQuery {
                root: plan.root,
                predicates: plan.predicates,
                parameters: plan.parameters.clone(),
                order: plan.order.clone(),
                window,
            })
            .await
            .map_err(|e| Self::phase_failed(QueryPhase::Identifiers, e))?;
        logging::log_query_phase(
            QueryPhase::Identifiers,
            entity,
            ids.len() as u64,
            elapsed_ms(started),
        );

        let expected = window.expected_page_len(total_count);
        if ids.len() as u64 != expected {
            debug!(
                entity = %entity,
                expected = expected,
                actual = ids.len(),
                "Identifier page length differs from count; rows changed between phases"
            );
        }

        if ids.is_empty() {
            logging::log_execution_summary(
                entity,
                window.first_result,
                window.page_size,
                total_count,
                0,
                2,
            );
            return Ok(PagedResult::new(Vec::new(), total_count));
        }

        // Phase C: hydrate the chosen identifiers, joins applied, same order
        let mut fetch = FetchPlan::new();
        self.descriptor.add_fetch_joins(&plan.root, &mut fetch);

        let requested = ids.len();
        let started = Instant::now();
        let entities = self
            .store
            .select_by_identifiers(&HydrationQuery {
                root: plan.root,
                ids,
                fetch,
                order: plan.order,
                parameters: plan.parameters,
            })
            .await
            .map_err(|e| Self::phase_failed(QueryPhase::Hydrate, e))?;
        logging::log_query_phase(
            QueryPhase::Hydrate,
            entity,
            entities.len() as u64,
            elapsed_ms(started),
        );

        let items = distinct_by_identity(entities);
        if items.len() > requested {
            warn!(
                entity = %entity,
                requested = requested,
                returned = items.len(),
                "Store hydrated more entities than identifiers requested"
            );
        } else if items.len() < requested {
            debug!(
                entity = %entity,
                requested = requested,
                returned = items.len(),
                "Page shrank between identifier and hydrate phases"
            );
        }

        logging::log_execution_summary(
            entity,
            window.first_result,
            window.page_size,
            total_count,
            items.len(),
            3,
        );

        Ok(PagedResult::new(items, total_count))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
