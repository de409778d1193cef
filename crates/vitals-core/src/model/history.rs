//! Fixed-capacity ordered buffer.

use std::collections::VecDeque;

/// Bounded buffer that evicts its oldest element on overflow.
///
/// Not internally synchronized: the owner is expected to hold whatever lock
/// also guards its readers, so the push path takes no redundant lock here.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> BoundedHistory<T> {
    /// A capacity of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Append `item`, evicting the oldest element when already full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Most recently pushed element.
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }
}
