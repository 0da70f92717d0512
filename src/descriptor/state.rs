//! Paging, ordering and result-count state carried by every descriptor.

use crate::query_builder::{OrderDirection, Ordering, PagingWindow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub window: PagingWindow,
    pub ordering: Ordering,
    result_count: Option<u64>,
}

impl QueryState {
    pub fn new(page_size: u64) -> Self {
        Self {
            window: PagingWindow::new(0, page_size),
            ..Self::default()
        }
    }

    pub fn with_order_by(mut self, property_id: &str, direction: OrderDirection) -> Self {
        self.ordering = Ordering::by(property_id, direction);
        self
    }

    /// Total rows matched by the last execution; `None` before the first one
    pub fn result_count(&self) -> Option<u64> {
        self.result_count
    }

    pub fn set_result_count(&mut self, count: u64) {
        self.result_count = Some(count);
    }

    fn count_or_zero(&self) -> u64 {
        self.result_count.unwrap_or(0)
    }

    pub fn first_result(&self) -> u64 {
        self.window.first_result
    }

    pub fn set_first_result(&mut self, first_result: u64) {
        self.window.first_result = first_result;
    }

    pub fn page_size(&self) -> u64 {
        self.window.page_size
    }

    /// Changing the page size returns to the first page
    pub fn set_page_size(&mut self, page_size: u64) {
        self.window.set_page_size(page_size);
    }

    pub fn set_order_by(&mut self, property_id: &str, direction: OrderDirection) {
        self.ordering = Ordering::by(property_id, direction);
    }

    pub fn clear_order_by(&mut self) {
        self.ordering = Ordering::default();
    }

    pub fn first_page(&mut self) {
        self.window.first_page();
    }

    pub fn next_page(&mut self) {
        let total = self.count_or_zero();
        self.window.next_page(total);
    }

    pub fn previous_page(&mut self) {
        self.window.previous_page();
    }

    pub fn last_page(&mut self) {
        let total = self.count_or_zero();
        self.window.last_page(total);
    }

    pub fn has_next_page(&self) -> bool {
        self.window.has_next_page(self.count_or_zero())
    }

    pub fn has_previous_page(&self) -> bool {
        self.window.has_previous_page()
    }

    pub fn last_result(&self) -> u64 {
        self.window.last_result(self.count_or_zero())
    }

    pub fn current_page(&self) -> u64 {
        self.window.current_page()
    }

    pub fn total_pages(&self) -> u64 {
        self.window.total_pages(self.count_or_zero())
    }

    /// Whether a 1-based "jump to row" value can be shown for the current count:
    /// any row 1..=count, or 0 when nothing matched
    pub fn is_valid_first_result_display(&self, display: u64) -> bool {
        match self.count_or_zero() {
            0 => display == 0,
            count => (1..=count).contains(&display),
        }
    }

    /// Back to the first page with no known count
    pub fn clear(&mut self) {
        self.window.first_page();
        self.result_count = None;
    }
}
