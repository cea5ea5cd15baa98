//! Fixed-capacity history buffer.

use std::collections::VecDeque;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Append-only buffer that keeps the most recent `N` entries.
///
/// Pushing onto a full buffer evicts the oldest entry in O(1). Iteration is in
/// insertion order, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedDeque<T, const N: usize> {
    items: VecDeque<T>,
}

impl<T, const N: usize> Default for BoundedDeque<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BoundedDeque<T, N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(N),
        }
    }

    /// Append an entry, evicting the oldest if the buffer is full.
    /// Returns the evicted entry.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= N {
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

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// Most recently pushed entry.
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T, const N: usize> FromIterator<T> for BoundedDeque<T, N> {
    /// Collects, keeping only the last `N` items.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        for item in iter {
            deque.push(item);
        }
        deque
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedDeque<T, N> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize, const N: usize> Serialize for BoundedDeque<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for BoundedDeque<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
