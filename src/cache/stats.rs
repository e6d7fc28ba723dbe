//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.
//! Counters are lock-free atomics so any number of concurrent readers can
//! record without lost updates; when tracking is disabled every recorder is
//! a no-op.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Internal counters, updated only when statistics are enabled.
#[derive(Debug)]
pub(crate) struct CacheStats {
    enabled: bool,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates counters at zero; `enabled` is fixed for the cache's lifetime.
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    // == Record Hit ==
    /// Increments the hit counter. A hit is any lookup that found the key,
    /// whether the slot is pending, resolved or expired.
    pub(crate) fn record_hit(&self) {
        if self.enabled {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    // == Record Miss ==
    /// Increments the miss counter. A miss is only "key absent from store".
    pub(crate) fn record_miss(&self) {
        if self.enabled {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub(crate) fn record_eviction(&self) {
        if self.enabled {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    // == Snapshot ==
    /// Returns a point-in-time copy of the counters.
    pub(crate) fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Number of lookups that found the key
    pub hits: u64,
    /// Number of lookups for an absent key
    pub misses: u64,
    /// Number of entries evicted by the LRU policy
    pub evictions: u64,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new(true);
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_record_when_enabled() {
        let stats = CacheStats::new(true);

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.hits, 2);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.evictions, 1);
    }

    #[test]
    fn test_stats_disabled_is_noop() {
        let stats = CacheStats::new(false);

        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_concurrent_increments() {
        use std::sync::Arc;

        let stats = Arc::new(CacheStats::new(true));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    stats.record_hit();
                    stats.record_miss();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.hits, 8_000);
        assert_eq!(snapshot.misses, 8_000);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(StatsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let snapshot = StatsSnapshot {
            hits: 1,
            misses: 1,
            evictions: 0,
        };
        assert_eq!(snapshot.hit_rate(), 0.5);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = StatsSnapshot {
            hits: 3,
            misses: 1,
            evictions: 2,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"hits":3,"misses":1,"evictions":2}"#);
    }
}
