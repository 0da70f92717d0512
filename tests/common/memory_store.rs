//! In-memory store that evaluates predicates, ordering and windows the way
//! the SQL store would, and records every call it receives.

use async_trait::async_trait;
use pagequery_core::constants::QueryPhase;
use pagequery_core::entity::Entity;
use pagequery_core::error::DataAccessError;
use pagequery_core::persistence::{CountQuery, HydrationQuery, IdentifierQuery, Persistence};
use pagequery_core::query_builder::{
    Condition, LogicalOperator, OrderDirection, OrderSpec, Parameters, Predicate, SqlValue,
};
use parking_lot::Mutex;
use std::cmp::Ordering;

/// Entity the memory store can filter, sort and hydrate
pub trait Record: Entity + Clone {
    /// Value of a root property, `SqlValue::Null` when unset
    fn property(&self, name: &str) -> SqlValue;

    /// Number of joined rows a fetched association contributes
    fn association_len(&self, _association: &str) -> usize {
        0
    }

    /// Drop association data that was not fetched
    fn retain_associations(&mut self, _fetched: &[&str]) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Count,
    SelectIdentifiers {
        first_result: u64,
        page_size: u64,
        order: String,
    },
    SelectByIdentifiers {
        requested: usize,
        associations: Vec<String>,
        order: String,
    },
}

pub struct MemoryStore<R: Record> {
    rows: Mutex<Vec<R>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_on: Mutex<Option<QueryPhase>>,
    delete_after_identifiers: Mutex<Vec<R::Id>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: Mutex::new(rows),
            calls: Mutex::new(Vec::new()),
            fail_on: Mutex::new(None),
            delete_after_identifiers: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn fail_on(&self, phase: QueryPhase) {
        *self.fail_on.lock() = Some(phase);
    }

    /// Simulate a concurrent delete landing between phase B and phase C
    pub fn delete_after_identifiers(&self, id: R::Id) {
        self.delete_after_identifiers.lock().push(id);
    }

    fn check_failure(&self, phase: QueryPhase) -> Result<(), DataAccessError> {
        if *self.fail_on.lock() == Some(phase) {
            return Err(DataAccessError::store(phase.as_str(), "connection reset by peer"));
        }
        Ok(())
    }

    fn matching(&self, predicates: &[Predicate], params: &Parameters) -> Vec<R> {
        self.rows
            .lock()
            .iter()
            .filter(|row| predicates.iter().all(|p| predicate_matches(*row, p, params)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl<R: Record> Persistence<R> for MemoryStore<R> {
    async fn count(&self, query: &CountQuery) -> Result<u64, DataAccessError> {
        self.calls.lock().push(StoreCall::Count);
        self.check_failure(QueryPhase::Count)?;
        Ok(self.matching(&query.predicates, &query.parameters).len() as u64)
    }

    async fn select_identifiers(
        &self,
        query: &IdentifierQuery,
    ) -> Result<Vec<R::Id>, DataAccessError> {
        self.calls.lock().push(StoreCall::SelectIdentifiers {
            first_result: query.window.first_result,
            page_size: query.window.page_size,
            order: query.order.to_sql(),
        });
        self.check_failure(QueryPhase::Identifiers)?;

        let mut rows = self.matching(&query.predicates, &query.parameters);
        sort_rows(&mut rows, &query.order);
        let ids = rows
            .iter()
            .skip(query.window.first_result as usize)
            .take(query.window.page_size as usize)
            .map(|row| row.id().clone())
            .collect();

        let deleted: Vec<R::Id> = self.delete_after_identifiers.lock().drain(..).collect();
        self.rows.lock().retain(|row| !deleted.contains(row.id()));

        Ok(ids)
    }

    async fn select_by_identifiers(
        &self,
        query: &HydrationQuery<R>,
    ) -> Result<Vec<R>, DataAccessError> {
        let associations = query.fetch.associations();
        self.calls.lock().push(StoreCall::SelectByIdentifiers {
            requested: query.ids.len(),
            associations: associations.iter().map(|a| a.to_string()).collect(),
            order: query.order.to_sql(),
        });
        self.check_failure(QueryPhase::Hydrate)?;

        let mut rows: Vec<R> = self
            .rows
            .lock()
            .iter()
            .filter(|row| query.ids.contains(row.id()))
            .cloned()
            .collect();
        sort_rows(&mut rows, &query.order);

        // A joined result set repeats the root row once per child row
        let mut joined = Vec::new();
        for mut row in rows {
            row.retain_associations(&associations);
            let fan_out = associations
                .iter()
                .map(|a| row.association_len(a).max(1))
                .product::<usize>()
                .max(1);
            for _ in 0..fan_out {
                joined.push(row.clone());
            }
        }
        Ok(joined)
    }
}

fn field_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

fn predicate_matches<R: Record>(row: &R, predicate: &Predicate, params: &Parameters) -> bool {
    let mut results = predicate
        .conditions
        .iter()
        .map(|c| condition_matches(row, c, params));
    match predicate.operator {
        LogicalOperator::And => results.all(|m| m),
        LogicalOperator::Or => results.any(|m| m),
    }
}

fn condition_matches<R: Record>(row: &R, condition: &Condition, params: &Parameters) -> bool {
    match condition {
        Condition::Compare {
            field,
            operator,
            operand,
        } => {
            let actual = row.property(field_name(field));
            let expected = operand.resolve(params).unwrap();
            let ordering = compare_values(&actual, expected);
            match operator.as_str() {
                "=" => actual == *expected,
                "<>" | "!=" => actual != *expected,
                "<" => ordering == Some(Ordering::Less),
                "<=" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                ">" => ordering == Some(Ordering::Greater),
                ">=" => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
                other => panic!("memory store does not support operator {other}"),
            }
        }
        Condition::In { field, operands } => {
            let actual = row.property(field_name(field));
            operands
                .iter()
                .any(|o| *o.resolve(params).unwrap() == actual)
        }
        Condition::NotIn { field, operands } => {
            let actual = row.property(field_name(field));
            operands
                .iter()
                .all(|o| *o.resolve(params).unwrap() != actual)
        }
        Condition::Between { field, start, end } => {
            let actual = row.property(field_name(field));
            let lower = compare_values(&actual, start.resolve(params).unwrap());
            let upper = compare_values(&actual, end.resolve(params).unwrap());
            matches!(lower, Some(Ordering::Greater | Ordering::Equal))
                && matches!(upper, Some(Ordering::Less | Ordering::Equal))
        }
        Condition::IsNull { field } => row.property(field_name(field)).is_null(),
        Condition::IsNotNull { field } => !row.property(field_name(field)).is_null(),
        other => panic!("memory store does not evaluate {other:?}"),
    }
}

fn compare_values(a: &SqlValue, b: &SqlValue) -> Option<Ordering> {
    a.partial_cmp_sql(b)
}

fn sort_rows<R: Record>(rows: &mut [R], order: &OrderSpec) {
    rows.sort_by(|a, b| {
        for term in order.terms() {
            let field = field_name(&term.path);
            let ordering = compare_values(&a.property(field), &b.property(field))
                .unwrap_or(Ordering::Equal);
            let ordering = match term.direction {
                OrderDirection::Asc => ordering,
                OrderDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}
