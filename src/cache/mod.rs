//! Cache Module
//!
//! Single-flight caching core: per-key slots, bounded LRU storage,
//! statistics, and the orchestrating cache.

mod single_flight;
mod lru;
mod slot;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use single_flight::{Cache, ResolveHandle};
pub use stats::StatsSnapshot;

// == Public Constants ==
/// Default maximum number of slots the cache holds
pub const DEFAULT_CAPACITY: usize = 1024;
