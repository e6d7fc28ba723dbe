//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug)]
pub(crate) struct LruTracker<K> {
    /// Order of keys by access time
    order: VecDeque<K>,
}

impl<K: Eq + Clone> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub(crate) fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    ///
    /// If the key exists, removes it first then adds to front.
    /// If the key is new, just adds to front.
    pub(crate) fn touch(&mut self, key: &K) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub(crate) fn remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the tracker is empty.
    pub(crate) fn evict_oldest(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub(crate) fn peek_oldest(&self) -> Option<&K> {
        self.order.back()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[cfg(test)]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

impl<K: Eq + Clone> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
