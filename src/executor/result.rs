use serde::Serialize;

/// One page of hydrated entities and the total number of matching rows.
/// Built fresh by every execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResult<E> {
    pub items: Vec<E>,
    pub total_count: u64,
}

impl<E> PagedResult<E> {
    pub fn new(items: Vec<E>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<E> {
        self.items
    }
}

impl<E> IntoIterator for PagedResult<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a PagedResult<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
