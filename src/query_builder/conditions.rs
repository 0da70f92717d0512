use super::builder::StatementWriter;
use super::SqlValue;
use crate::error::ContractViolation;

/// Right-hand side of a condition: an inline literal or a named parameter
/// resolved from the descriptor's [`Parameters`](super::Parameters) at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(SqlValue),
    Param(String),
}

impl Operand {
    pub fn param(name: &str) -> Self {
        Operand::Param(name.to_string())
    }

    pub fn literal(value: impl Into<SqlValue>) -> Self {
        Operand::Literal(value.into())
    }

    /// Resolve against bound parameters
    pub fn resolve<'a>(
        &'a self,
        params: &'a super::Parameters,
    ) -> Result<&'a SqlValue, ContractViolation> {
        match self {
            Operand::Literal(value) => Ok(value),
            Operand::Param(name) => params.require(name),
        }
    }

    fn param_name(&self) -> Option<&str> {
        match self {
            Operand::Param(name) => Some(name),
            Operand::Literal(_) => None,
        }
    }
}

/// Represents different types of SQL conditions
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        field: String,
        operator: String,
        operand: Operand,
    },
    In {
        field: String,
        operands: Vec<Operand>,
    },
    NotIn {
        field: String,
        operands: Vec<Operand>,
    },
    Between {
        field: String,
        start: Operand,
        end: Operand,
    },
    IsNull {
        field: String,
    },
    IsNotNull {
        field: String,
    },
    Exists {
        subquery: String,
    },
    NotExists {
        subquery: String,
    },
    JsonContains {
        field: String,
        operand: Operand,
    },
    Raw {
        sql: String,
    },
}

impl Condition {
    pub(crate) fn write_sql(&self, w: &mut StatementWriter<'_>) -> Result<(), ContractViolation> {
        match self {
            Condition::Compare {
                field,
                operator,
                operand,
            } => {
                w.push(&format!("{field} {operator} "));
                w.push_operand(operand)?;
            }
            Condition::In { field, operands } => {
                // IN () is not valid SQL; an empty list matches nothing
                if operands.is_empty() {
                    w.push("1=0");
                } else {
                    w.push(&format!("{field} IN ("));
                    w.push_operand_list(operands)?;
                    w.push(")");
                }
            }
            Condition::NotIn { field, operands } => {
                if operands.is_empty() {
                    w.push("1=1");
                } else {
                    w.push(&format!("{field} NOT IN ("));
                    w.push_operand_list(operands)?;
                    w.push(")");
                }
            }
            Condition::Between { field, start, end } => {
                w.push(&format!("{field} BETWEEN "));
                w.push_operand(start)?;
                w.push(" AND ");
                w.push_operand(end)?;
            }
            Condition::IsNull { field } => w.push(&format!("{field} IS NULL")),
            Condition::IsNotNull { field } => w.push(&format!("{field} IS NOT NULL")),
            Condition::Exists { subquery } => w.push(&format!("EXISTS ({subquery})")),
            Condition::NotExists { subquery } => w.push(&format!("NOT EXISTS ({subquery})")),
            Condition::JsonContains { field, operand } => {
                w.push(&format!("{field} @> "));
                w.push_operand(operand)?;
            }
            Condition::Raw { sql } => w.push(sql),
        }
        Ok(())
    }

    /// Names of parameters this condition needs bound
    pub fn param_names(&self) -> Vec<&str> {
        match self {
            Condition::Compare { operand, .. } | Condition::JsonContains { operand, .. } => {
                operand.param_name().into_iter().collect()
            }
            Condition::In { operands, .. } | Condition::NotIn { operands, .. } => {
                operands.iter().filter_map(Operand::param_name).collect()
            }
            Condition::Between { start, end, .. } => {
                [start, end].into_iter().filter_map(Operand::param_name).collect()
            }
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// A composable filter: one or more conditions joined by a logical operator.
/// Predicates returned together by a descriptor are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub conditions: Vec<Condition>,
    pub operator: LogicalOperator,
}

impl Predicate {
    fn single(condition: Condition) -> Self {
        Self {
            conditions: vec![condition],
            operator: LogicalOperator::And,
        }
    }

    /// `field <operator> literal`
    pub fn compare(field: &str, operator: &str, value: impl Into<SqlValue>) -> Self {
        Self::single(Condition::Compare {
            field: field.to_string(),
            operator: operator.to_string(),
            operand: Operand::literal(value),
        })
    }

    /// `field <operator> :param`
    pub fn compare_param(field: &str, operator: &str, param: &str) -> Self {
        Self::single(Condition::Compare {
            field: field.to_string(),
            operator: operator.to_string(),
            operand: Operand::param(param),
        })
    }

    pub fn eq(field: &str, value: impl Into<SqlValue>) -> Self {
        Self::compare(field, "=", value)
    }

    /// Equality against a named parameter, the usual shape of a parent filter
    pub fn eq_param(field: &str, param: &str) -> Self {
        Self::compare_param(field, "=", param)
    }

    pub fn in_list(field: &str, values: Vec<SqlValue>) -> Self {
        Self::single(Condition::In {
            field: field.to_string(),
            operands: values.into_iter().map(Operand::Literal).collect(),
        })
    }

    pub fn not_in_list(field: &str, values: Vec<SqlValue>) -> Self {
        Self::single(Condition::NotIn {
            field: field.to_string(),
            operands: values.into_iter().map(Operand::Literal).collect(),
        })
    }

    pub fn between(field: &str, start: Operand, end: Operand) -> Self {
        Self::single(Condition::Between {
            field: field.to_string(),
            start,
            end,
        })
    }

    pub fn is_null(field: &str) -> Self {
        Self::single(Condition::IsNull {
            field: field.to_string(),
        })
    }

    pub fn is_not_null(field: &str) -> Self {
        Self::single(Condition::IsNotNull {
            field: field.to_string(),
        })
    }

    pub fn exists(subquery: &str) -> Self {
        Self::single(Condition::Exists {
            subquery: subquery.to_string(),
        })
    }

    pub fn not_exists(subquery: &str) -> Self {
        Self::single(Condition::NotExists {
            subquery: subquery.to_string(),
        })
    }

    pub fn json_contains(field: &str, operand: Operand) -> Self {
        Self::single(Condition::JsonContains {
            field: field.to_string(),
            operand,
        })
    }

    pub fn raw(sql: &str) -> Self {
        Self::single(Condition::Raw {
            sql: sql.to_string(),
        })
    }

    /// Combine multiple conditions with AND
    pub fn and(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::And,
        }
    }

    /// Combine multiple conditions with OR
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::Or,
        }
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.conditions
            .iter()
            .flat_map(Condition::param_names)
            .collect()
    }

    pub(crate) fn write_sql(&self, w: &mut StatementWriter<'_>) -> Result<(), ContractViolation> {
        // Empty conjunction is TRUE, empty disjunction is FALSE
        if self.conditions.is_empty() {
            w.push(match self.operator {
                LogicalOperator::And => "1=1",
                LogicalOperator::Or => "1=0",
            });
            return Ok(());
        }

        if self.conditions.len() == 1 {
            return self.conditions[0].write_sql(w);
        }

        let operator_str = match self.operator {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };

        w.push("(");
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                w.push(operator_str);
            }
            condition.write_sql(w)?;
        }
        w.push(")");
        Ok(())
    }
}
