use crate::constants::sql::JOIN_COLUMN_SEPARATOR;

/// Represents different types of SQL JOINs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

impl JoinType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
        }
    }
}

/// Whether a fetch join can multiply root rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ToOne,
    ToMany,
}

/// An association to hydrate eagerly on the final entity fetch.
///
/// Joined columns come back aliased as `<alias>__<column>` so they can never
/// collide with the root entity's own columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchJoin {
    pub association: String,
    pub join_type: JoinType,
    pub cardinality: Cardinality,
    pub table: String,
    pub alias: String,
    pub on_condition: String,
    pub columns: Vec<String>,
}

impl FetchJoin {
    /// One-to-many collection, LEFT joined so parents without children survive
    pub fn to_many(association: &str, table: &str, alias: &str, on_condition: &str) -> Self {
        Self {
            association: association.to_string(),
            join_type: JoinType::Left,
            cardinality: Cardinality::ToMany,
            table: table.to_string(),
            alias: alias.to_string(),
            on_condition: on_condition.to_string(),
            columns: Vec::new(),
        }
    }

    /// Single reference
    pub fn to_one(association: &str, table: &str, alias: &str, on_condition: &str) -> Self {
        Self {
            cardinality: Cardinality::ToOne,
            ..Self::to_many(association, table, alias, on_condition)
        }
    }

    pub fn inner(mut self) -> Self {
        self.join_type = JoinType::Inner;
        self
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Name under which `column` appears in a hydration row
    pub fn column_alias(&self, column: &str) -> String {
        format!("{}{}{}", self.alias, JOIN_COLUMN_SEPARATOR, column)
    }

    pub fn select_sql(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| format!("{}.{} AS \"{}\"", self.alias, c, self.column_alias(c)))
            .collect()
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        format!(
            "{} {} {} ON {}",
            self.join_type.to_sql(),
            self.table,
            self.alias,
            self.on_condition
        )
    }
}

/// Fetch joins declared by a descriptor for one execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchPlan {
    joins: Vec<FetchJoin>,
}

impl FetchPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an association; declaring the same association twice keeps the first
    pub fn add(&mut self, join: FetchJoin) -> &mut Self {
        if !self.contains(&join.association) {
            self.joins.push(join);
        }
        self
    }

    pub fn contains(&self, association: &str) -> bool {
        self.joins.iter().any(|j| j.association == association)
    }

    pub fn joins(&self) -> &[FetchJoin] {
        &self.joins
    }

    pub fn associations(&self) -> Vec<&str> {
        self.joins.iter().map(|j| j.association.as_str()).collect()
    }

    pub fn fans_out(&self) -> bool {
        self.joins.iter().any(|j| j.cardinality == Cardinality::ToMany)
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }
}
