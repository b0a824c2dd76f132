//! Fixed-capacity FIFO history.

use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// A FIFO buffer that evicts its oldest entry when full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// `capacity` must be non-zero; configuration validation enforces it.
    pub fn new(capacity: usize) -> Self {
        BoundedHistory {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append, evicting and returning the oldest entry if at capacity.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
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

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> BoundedHistory<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T: Serialize> Serialize for BoundedHistory<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_first() {
        let mut history = BoundedHistory::new(3);
        assert_eq!(history.push(1), None);
        history.push(2);
        history.push(3);
        assert_eq!(history.push(4), Some(1));
        assert_eq!(history.to_vec(), vec![2, 3, 4]);
        assert_eq!(history.latest(), Some(&4));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_serializes_as_sequence() {
        let mut history = BoundedHistory::new(2);
        history.push("a");
        history.push("b");
        history.push("c");
        assert_eq!(serde_json::to_string(&history).unwrap(), r#"["b","c"]"#);
    }
}
