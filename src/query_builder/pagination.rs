use crate::constants::paging::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// One page of a result set: `first_result` is a zero-based offset,
/// `page_size` the capacity of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingWindow {
    pub first_result: u64,
    pub page_size: u64,
}

impl Default for PagingWindow {
    fn default() -> Self {
        Self {
            first_result: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagingWindow {
    pub fn new(first_result: u64, page_size: u64) -> Self {
        Self {
            first_result,
            page_size,
        }
    }

    /// Window for a 1-indexed page number
    pub fn page(page: u64, page_size: u64) -> Self {
        Self {
            first_result: page.saturating_sub(1).saturating_mul(page_size),
            page_size,
        }
    }

    /// Number of identifiers an identifier-page query returns when `total_count`
    /// rows match: `min(page_size, max(0, total_count - first_result))`
    pub fn expected_page_len(&self, total_count: u64) -> u64 {
        self.page_size
            .min(total_count.saturating_sub(self.first_result))
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        format!(" LIMIT {} OFFSET {}", self.page_size, self.first_result)
    }

    /// Changing the page size starts over from the first page
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size;
        self.first_result = 0;
    }

    pub fn first_page(&mut self) {
        self.first_result = 0;
    }

    pub fn next_page(&mut self, total_count: u64) {
        if self.has_next_page(total_count) {
            self.first_result = self.first_result.saturating_add(self.page_size);
        }
    }

    pub fn previous_page(&mut self) {
        self.first_result = self.first_result.saturating_sub(self.page_size);
    }

    pub fn last_page(&mut self, total_count: u64) {
        if total_count == 0 || self.page_size == 0 {
            self.first_result = 0;
        } else {
            self.first_result = ((total_count - 1) / self.page_size) * self.page_size;
        }
    }

    /// Check if there's a next page
    pub fn has_next_page(&self, total_count: u64) -> bool {
        self.first_result.saturating_add(self.page_size) < total_count
    }

    /// Check if there's a previous page
    pub fn has_previous_page(&self) -> bool {
        self.first_result > 0
    }

    /// 1-based index of the last row shown on the current page
    pub fn last_result(&self, total_count: u64) -> u64 {
        self.first_result
            .saturating_add(self.page_size)
            .min(total_count)
    }

    /// Get current page number (1-indexed)
    pub fn current_page(&self) -> u64 {
        if self.page_size == 0 {
            1
        } else {
            self.first_result / self.page_size + 1
        }
    }

    /// Calculate total pages given a total count
    pub fn total_pages(&self, total_count: u64) -> u64 {
        if self.page_size == 0 {
            0
        } else {
            total_count.div_ceil(self.page_size)
        }
    }
}
