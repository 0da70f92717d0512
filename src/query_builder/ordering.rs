use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            OrderDirection::Asc => OrderDirection::Desc,
            OrderDirection::Desc => OrderDirection::Asc,
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

/// Descriptor-side ordering state: which property, which way
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub property_id: Option<String>,
    pub direction: OrderDirection,
}

impl Ordering {
    pub fn by(property_id: &str, direction: OrderDirection) -> Self {
        Self {
            property_id: Some(property_id.to_string()),
            direction,
        }
    }
}

/// One resolved ORDER BY term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub path: String,
    pub direction: OrderDirection,
}

impl OrderBy {
    pub fn new(path: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            path: path.into(),
            direction,
        }
    }

    pub fn to_sql(&self) -> String {
        format!("{} {}", self.path, self.direction.to_sql())
    }
}

/// The ordering expression shared by the identifier page and the hydrated
/// fetch. Both statements must render the same terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSpec {
    terms: Vec<OrderBy>,
}

impl OrderSpec {
    pub fn new(terms: Vec<OrderBy>) -> Self {
        Self { terms }
    }

    /// Order by `path`, then by the identity path so ties break the same way
    /// in every statement that renders these terms
    pub fn with_tie_breaker(path: String, direction: OrderDirection, id_path: String) -> Self {
        let mut terms = vec![OrderBy::new(path.clone(), direction)];
        if path != id_path {
            terms.push(OrderBy::new(id_path, direction));
        }
        Self { terms }
    }

    pub fn terms(&self) -> &[OrderBy] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn to_sql(&self) -> String {
        self.terms
            .iter()
            .map(OrderBy::to_sql)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
