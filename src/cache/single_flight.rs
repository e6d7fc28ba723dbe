//! Cache Core Module
//!
//! The orchestrating `Cache` type: slot reservation, lookup with optional
//! wait budget, and statistics. Composes the bounded store with per-key
//! slots and exposes the reserve/resolve contract.

use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::slot::Slot;
use crate::cache::stats::{CacheStats, StatsSnapshot};
use crate::cache::store::BoundedStore;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache ==
/// Single-flight cache with TTL expiration and LRU eviction.
///
/// When many callers request the same missing key, exactly one of them
/// reserves the key and becomes its producer; everyone else waits on the
/// reserved slot and receives the producer's outcome, value or error, the
/// moment it resolves.
///
/// The typical read path:
///
/// 1. [`get`](Self::get) the key.
/// 2. On [`CacheError::EntryNotFound`] or [`CacheError::Expired`], call
///    [`reserve`](Self::reserve), perform the fetch, and
///    [`resolve`](ResolveHandle::resolve) the returned handle with the
///    outcome.
///
/// All methods take `&self`; share the cache between tasks or threads by
/// wrapping it in an [`Arc`].
#[derive(Debug)]
pub struct Cache<K, V> {
    /// Bounded slot store; the mutex guards bookkeeping only and is never
    /// held across an await
    store: Mutex<BoundedStore<K, Arc<Slot<V>>>>,
    /// Hit/miss/eviction counters
    stats: CacheStats,
    /// Lifetime applied by `reserve`, None = never expires
    default_lifetime: Option<Duration>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new cache from the given configuration.
    ///
    /// Fails with [`CacheError::InvalidCapacity`] if the capacity is zero.
    pub fn new(config: CacheConfig) -> Result<Self> {
        if config.capacity == 0 {
            return Err(CacheError::InvalidCapacity(config.capacity));
        }

        Ok(Self {
            store: Mutex::new(BoundedStore::new(config.capacity)),
            stats: CacheStats::new(config.with_stats),
            default_lifetime: config.default_lifetime,
        })
    }

    // == Get ==
    /// Gets a cached value by key, waiting indefinitely on a pending slot.
    ///
    /// Returns [`CacheError::EntryNotFound`] if no slot is registered under
    /// the key.
    pub async fn get(&self, key: &K) -> Result<V> {
        self.get_with_timeout(key, None).await
    }

    // == Get With Timeout ==
    /// Gets a cached value by key, bounding the wait on a pending slot.
    ///
    /// `None` waits indefinitely; `Some(Duration::ZERO)` is a non-blocking
    /// poll. Returns [`CacheError::EntryNotFound`] if the key is absent,
    /// [`CacheError::Expired`] if the slot's lifetime has elapsed (an
    /// expired slot is never awaited), [`CacheError::GetTimeout`] if the
    /// budget elapses first, and the producer's own error if the slot was
    /// resolved with one.
    pub async fn get_with_timeout(&self, key: &K, timeout: Option<Duration>) -> Result<V> {
        let slot = {
            let mut store = self.store.lock().expect("cache store lock poisoned");
            store.lookup(key).map(Arc::clone)
        };

        let Some(slot) = slot else {
            self.stats.record_miss();
            return Err(CacheError::EntryNotFound);
        };

        // Presence in the store is a hit, whatever state the slot is in
        self.stats.record_hit();

        if slot.is_expired(Instant::now()) {
            return Err(CacheError::Expired);
        }

        slot.wait(timeout).await
    }

    // == Reserve ==
    /// Reserves a pending slot for `key` using the configured default
    /// lifetime.
    ///
    /// See [`reserve_with_lifetime`](Self::reserve_with_lifetime).
    pub fn reserve(&self, key: K) -> ResolveHandle<V> {
        self.reserve_with_lifetime(key, self.default_lifetime)
    }

    // == Reserve With Lifetime ==
    /// Reserves a pending slot for `key` and returns its single-use resolve
    /// handle.
    ///
    /// The new slot replaces any existing slot under the key and may evict
    /// the least-recently-used entry of an unrelated key. Callers already
    /// waiting on a replaced or evicted slot keep waiting on it; only fresh
    /// lookups see the new slot.
    ///
    /// The caller must eventually call [`ResolveHandle::resolve`] with the
    /// fetch outcome. Until then every `get` for the key blocks (up to its
    /// own timeout); a reservation that is dropped unresolved leaves the
    /// key blocked until it is evicted or reserved again.
    pub fn reserve_with_lifetime(&self, key: K, lifetime: Option<Duration>) -> ResolveHandle<V> {
        let slot = Arc::new(Slot::new());

        let evicted = {
            let mut store = self.store.lock().expect("cache store lock poisoned");
            store.insert(key, Arc::clone(&slot))
        };

        if let Some((_, old_slot)) = evicted {
            self.stats.record_eviction();
            debug!(
                was_pending = !old_slot.is_resolved(),
                "evicted least-recently-used cache slot"
            );
        }

        ResolveHandle {
            slot: Some(slot),
            lifetime,
        }
    }

    // == Length ==
    /// Returns the number of slots currently in the store, pending and
    /// resolved alike.
    pub fn len(&self) -> usize {
        self.store.lock().expect("cache store lock poisoned").len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Stats ==
    /// Returns a snapshot of the hit/miss/eviction counters.
    ///
    /// All zeros unless statistics were enabled at construction.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

// == Resolve Handle ==
/// Single-use handle for resolving a reserved slot.
///
/// [`resolve`](Self::resolve) consumes the handle, so the exactly-once
/// contract is enforced at compile time for the holding caller; the slot
/// itself additionally panics on a second resolution. The handle is `Send`,
/// the producer may resolve from any task or thread.
#[derive(Debug)]
pub struct ResolveHandle<V> {
    slot: Option<Arc<Slot<V>>>,
    lifetime: Option<Duration>,
}

impl<V> ResolveHandle<V> {
    // == Resolve ==
    /// Supplies the slot's final outcome and releases every waiter.
    ///
    /// The expiration instant is computed now, from this instant plus the
    /// lifetime fixed at reservation time. A producer error is memoized
    /// with the slot and delivered to all current and future waiters until
    /// the key is re-reserved or evicted.
    pub fn resolve(mut self, outcome: anyhow::Result<V>) {
        let slot = self
            .slot
            .take()
            .expect("resolve handle consumed without a slot");
        slot.resolve(outcome, self.lifetime);
    }
}

impl<V> Drop for ResolveHandle<V> {
    fn drop(&mut self) {
        // `resolve` takes the slot out; anything left here was abandoned.
        if self.slot.is_some() {
            warn!(
                "cache reservation dropped without resolving; \
                 waiters block until the key is evicted or reserved again"
            );
        }
    }
}
