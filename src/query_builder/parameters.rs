use super::SqlValue;
use crate::error::ContractViolation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named parameter values referenced by predicates through `Operand::Param`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    values: HashMap<String, SqlValue>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value, replacing any earlier binding of the same name
    pub fn bind(&mut self, name: &str, value: impl Into<SqlValue>) -> &mut Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.values.get(name)
    }

    /// Look up a value that a predicate depends on
    pub fn require(&self, name: &str) -> Result<&SqlValue, ContractViolation> {
        self.values
            .get(name)
            .ok_or_else(|| ContractViolation::UnboundParameter {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
