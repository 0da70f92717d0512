//! Orders with line items, and the descriptors used across the integration tests.

use super::memory_store::{MemoryStore, Record};
use pagequery_core::descriptor::{
    ParentRef, QueryDescriptor, QueryState, RelationshipQueryDescriptor, RootContext,
};
use pagequery_core::entity::Entity;
use pagequery_core::query_builder::{
    Condition, FetchJoin, FetchPlan, Operand, Parameters, Predicate, SqlValue,
};

pub const LINE_ITEMS: &str = "line_items";

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: i64,
    pub order_id: i64,
    pub sku: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub customer: String,
    pub status: String,
    pub placed_on: i64,
    pub line_items: Vec<LineItem>,
}

impl Entity for Order {
    type Id = i64;
    const TABLE: &'static str = "orders";
    const PROPERTIES: &'static [&'static str] = &["customer", "status", "placed_on"];

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Record for Order {
    fn property(&self, name: &str) -> SqlValue {
        match name {
            "id" => SqlValue::from(self.id),
            "customer" => SqlValue::from(self.customer.clone()),
            "status" => SqlValue::from(self.status.clone()),
            "placed_on" => SqlValue::from(self.placed_on),
            _ => SqlValue::Null,
        }
    }

    fn association_len(&self, association: &str) -> usize {
        if association == LINE_ITEMS {
            self.line_items.len()
        } else {
            0
        }
    }

    fn retain_associations(&mut self, fetched: &[&str]) {
        if !fetched.contains(&LINE_ITEMS) {
            self.line_items.clear();
        }
    }
}

impl Entity for LineItem {
    type Id = i64;
    const TABLE: &'static str = "line_items";
    const PROPERTIES: &'static [&'static str] = &["order_id", "sku", "quantity"];

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Record for LineItem {
    fn property(&self, name: &str) -> SqlValue {
        match name {
            "id" => SqlValue::from(self.id),
            "order_id" => SqlValue::from(self.order_id),
            "sku" => SqlValue::from(self.sku.clone()),
            "quantity" => SqlValue::from(self.quantity),
            _ => SqlValue::Null,
        }
    }
}

/// `count` orders, ids 1..=count, each with `items_per_order` line items.
/// Order n was placed on day `100 - n`, so ordering by `placed_on` reverses id order.
pub fn orders(count: i64, items_per_order: i64) -> Vec<Order> {
    (1..=count)
        .map(|id| Order {
            id,
            customer: format!("customer-{}", id % 3),
            status: if id % 2 == 0 { "shipped" } else { "open" }.to_string(),
            placed_on: 100 - id,
            line_items: line_items_for(id, items_per_order),
        })
        .collect()
}

pub fn line_items_for(order_id: i64, count: i64) -> Vec<LineItem> {
    (1..=count)
        .map(|n| LineItem {
            id: order_id * 100 + n,
            order_id,
            sku: format!("SKU-{order_id}-{n}"),
            quantity: n,
        })
        .collect()
}

pub fn order_store(count: i64, items_per_order: i64) -> MemoryStore<Order> {
    MemoryStore::new(orders(count, items_per_order))
}

pub fn line_item_store(orders: &[Order]) -> MemoryStore<LineItem> {
    MemoryStore::new(
        orders
            .iter()
            .flat_map(|o| o.line_items.iter().cloned())
            .collect(),
    )
}

/// Orders, optionally filtered by status, optionally fetching line items
pub struct OrderQuery {
    pub state: QueryState,
    pub status: Option<String>,
    /// Matches orders in any of these statuses; an empty list matches none
    pub any_status: Option<Vec<String>>,
    pub fetch_line_items: bool,
    pub order_by_placed_on_custom: bool,
}

impl OrderQuery {
    pub fn new(page_size: u64) -> Self {
        Self {
            state: QueryState::new(page_size),
            status: None,
            any_status: None,
            fetch_line_items: true,
            order_by_placed_on_custom: false,
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_any_status(mut self, statuses: &[&str]) -> Self {
        self.any_status = Some(statuses.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn starting_at(mut self, first_result: u64) -> Self {
        self.state.set_first_result(first_result);
        self
    }
}

impl QueryDescriptor for OrderQuery {
    type Entity = Order;

    fn state(&self) -> &QueryState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut QueryState {
        &mut self.state
    }

    fn build_predicates(&self, root: &RootContext) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if self.status.is_some() {
            predicates.push(Predicate::eq_param(&root.get("status"), "status"));
        }
        if let Some(statuses) = &self.any_status {
            predicates.push(Predicate::or(
                statuses
                    .iter()
                    .map(|status| Condition::Compare {
                        field: root.get("status"),
                        operator: "=".to_string(),
                        operand: Operand::literal(status.as_str()),
                    })
                    .collect(),
            ));
        }
        predicates
    }

    fn build_custom_order(&self, root: &RootContext) -> Option<String> {
        self.order_by_placed_on_custom
            .then(|| root.get("placed_on"))
    }

    fn add_fetch_joins(&self, root: &RootContext, fetch: &mut FetchPlan) {
        if self.fetch_line_items {
            fetch.add(
                FetchJoin::to_many(
                    LINE_ITEMS,
                    "line_items",
                    "li",
                    &format!("li.order_id = {}", root.id_path()),
                )
                .columns(&["id", "sku", "quantity"]),
            );
        }
    }

    fn bind_parameters(&self, params: &mut Parameters) {
        if let Some(status) = &self.status {
            params.bind("status", status.as_str());
        }
    }
}

/// Line items of one order
pub struct LineItemQuery {
    pub state: QueryState,
    pub order: Option<ParentRef<Order>>,
}

impl LineItemQuery {
    pub fn new(page_size: u64) -> Self {
        Self {
            state: QueryState::new(page_size),
            order: None,
        }
    }

    pub fn of(mut self, parent: ParentRef<Order>) -> Self {
        self.order = Some(parent);
        self
    }
}

impl QueryDescriptor for LineItemQuery {
    type Entity = LineItem;

    fn state(&self) -> &QueryState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut QueryState {
        &mut self.state
    }

    fn build_predicates(&self, root: &RootContext) -> Vec<Predicate> {
        vec![Predicate::eq_param(&root.get("order_id"), "order_id")]
    }

    fn bind_parameters(&self, params: &mut Parameters) {
        if let Some(order_id) = self.parent_id() {
            params.bind("order_id", *order_id);
        }
    }
}

impl RelationshipQueryDescriptor for LineItemQuery {
    type Parent = Order;

    fn parent(&self) -> Option<&ParentRef<Order>> {
        self.order.as_ref()
    }

    fn set_parent(&mut self, parent: Option<ParentRef<Order>>) {
        self.order = parent;
    }
}
