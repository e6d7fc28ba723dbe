//! Bounded Store Module
//!
//! Fixed-capacity key-value storage combining a HashMap with LRU tracking.
//! This is the dumb bookkeeping leaf of the cache: it knows nothing about
//! slots, expiration or statistics, only about capacity and recency.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::lru::LruTracker;

// == Bounded Store ==
/// Fixed-capacity associative container with LRU eviction on overflow.
///
/// Every access through [`insert`](Self::insert) or [`lookup`](Self::lookup)
/// marks the key most-recently-used. When an insert of a *new* key would
/// exceed the capacity, the single least-recently-used entry is evicted and
/// handed back to the caller; replacing an existing key never evicts.
#[derive(Debug)]
pub(crate) struct BoundedStore<K, T> {
    /// Key-value storage
    entries: HashMap<K, T>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Maximum number of entries allowed, fixed at construction
    capacity: usize,
}

impl<K: Eq + Hash + Clone, T> BoundedStore<K, T> {
    // == Constructor ==
    /// Creates a new store with the given capacity.
    ///
    /// Capacity must be validated by the caller; the store itself assumes
    /// it is non-zero.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            lru: LruTracker::new(),
            capacity,
        }
    }

    // == Insert ==
    /// Inserts or replaces the value for `key` and marks it most-recently-used.
    ///
    /// Returns the entry evicted to make room, if the insert overflowed the
    /// capacity. The evicted value is returned rather than dropped so the
    /// caller can count and log the eviction.
    pub(crate) fn insert(&mut self, key: K, value: T) -> Option<(K, T)> {
        let is_replace = self.entries.contains_key(&key);

        let mut evicted = None;
        if !is_replace && self.entries.len() >= self.capacity {
            if let Some(old_key) = self.lru.evict_oldest() {
                let old_value = self
                    .entries
                    .remove(&old_key)
                    .expect("LRU tracker out of sync with entry map");
                evicted = Some((old_key, old_value));
            }
        }

        self.entries.insert(key.clone(), value);
        self.lru.touch(&key);

        evicted
    }

    // == Lookup ==
    /// Returns the current value for `key` if present and marks it
    /// most-recently-used. Does not block.
    pub(crate) fn lookup(&mut self, key: &K) -> Option<&T> {
        if self.entries.contains_key(key) {
            self.lru.touch(key);
        }
        self.entries.get(key)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    // == Capacity ==
    /// Returns the fixed capacity.
    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}
