use super::{FetchJoin, Operand, OrderSpec, PagingWindow, Parameters, Predicate, SqlValue};
use crate::error::ContractViolation;

/// Rendered SQL with positional (`$n`) placeholders and their values in order
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub binds: Vec<SqlValue>,
}

/// Accumulates SQL text and bind values while conditions render themselves
pub struct StatementWriter<'p> {
    sql: String,
    binds: Vec<SqlValue>,
    params: &'p Parameters,
}

impl<'p> StatementWriter<'p> {
    pub fn new(params: &'p Parameters) -> Self {
        Self {
            sql: String::new(),
            binds: Vec::new(),
            params,
        }
    }

    pub fn push(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub fn push_bind(&mut self, value: SqlValue) {
        self.binds.push(value);
        self.sql.push_str(&format!("${}", self.binds.len()));
    }

    pub fn push_operand(&mut self, operand: &Operand) -> Result<(), ContractViolation> {
        let value = operand.resolve(self.params)?.clone();
        self.push_bind(value);
        Ok(())
    }

    pub fn push_operand_list(&mut self, operands: &[Operand]) -> Result<(), ContractViolation> {
        for (i, operand) in operands.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_operand(operand)?;
        }
        Ok(())
    }

    /// Placeholder for a value the caller binds itself after `binds`
    fn push_trailing_placeholder(&mut self) {
        self.sql.push_str(&format!("${}", self.binds.len() + 1));
    }

    pub fn finish(self) -> SqlStatement {
        SqlStatement {
            sql: self.sql,
            binds: self.binds,
        }
    }
}

/// SQL AST builder for the statements a paged execution issues.
///
/// Clauses can be added in any order; `build` always renders
/// SELECT / FROM / JOIN / WHERE / ORDER BY / LIMIT-OFFSET.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_table: String,
    alias: String,
    select_fields: Vec<String>,
    joins: Vec<FetchJoin>,
    predicates: Vec<Predicate>,
    any_of_bound_array: Option<String>,
    order: OrderSpec,
    window: Option<PagingWindow>,
}

impl QueryBuilder {
    /// Create a new query builder for the given table, aliased
    pub fn new(table: &str, alias: &str) -> Self {
        Self {
            base_table: table.to_string(),
            alias: alias.to_string(),
            select_fields: vec![format!("{alias}.*")],
            joins: Vec::new(),
            predicates: Vec::new(),
            any_of_bound_array: None,
            order: OrderSpec::default(),
            window: None,
        }
    }

    /// Set specific fields to select
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn select_count(self) -> Self {
        self.select(&["COUNT(*)"])
    }

    /// Add a fetch join; its aliased columns are appended to the selection
    pub fn fetch_join(mut self, join: FetchJoin) -> Self {
        self.select_fields.extend(join.select_sql());
        self.joins.push(join);
        self
    }

    pub fn where_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn where_all(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    /// `field = ANY($n)` where `$n` is one past the rendered binds; the caller
    /// binds the array after the statement's own values
    pub fn where_any_of_bound_array(mut self, field: &str) -> Self {
        self.any_of_bound_array = Some(field.to_string());
        self
    }

    pub fn order(mut self, order: OrderSpec) -> Self {
        self.order = order;
        self
    }

    pub fn paginate(mut self, window: PagingWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Build the complete statement, resolving named parameters
    pub fn build(&self, params: &Parameters) -> Result<SqlStatement, ContractViolation> {
        let mut w = StatementWriter::new(params);

        w.push("SELECT ");
        w.push(&self.select_fields.join(", "));
        w.push(&format!(" FROM {} {}", self.base_table, self.alias));

        for join in &self.joins {
            w.push(" ");
            w.push(&join.to_sql());
        }

        let mut first = true;
        for predicate in &self.predicates {
            w.push(if first { " WHERE " } else { " AND " });
            first = false;
            predicate.write_sql(&mut w)?;
        }

        if let Some(field) = &self.any_of_bound_array {
            w.push(if first { " WHERE " } else { " AND " });
            w.push(&format!("{field} = ANY("));
            w.push_trailing_placeholder();
            w.push(")");
        }

        if !self.order.is_empty() {
            w.push(&format!(" ORDER BY {}", self.order.to_sql()));
        }

        if let Some(window) = &self.window {
            w.push(&window.to_sql());
        }

        Ok(w.finish())
    }
}
