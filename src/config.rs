//! Configuration Module
//!
//! Cache construction parameters with sensible defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY;

/// Cache configuration, fixed at construction.
///
/// All fields have defaults, so partial configuration works both in code
/// (struct update syntax over `Default`) and when deserialized from an
/// application config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of slots the cache can hold (default: 1024, must be > 0)
    pub capacity: usize,
    /// Lifetime applied to reservations that don't override it.
    /// `None` means resolved entries never expire (default).
    pub default_lifetime: Option<Duration>,
    /// Whether hit/miss/eviction counters are tracked (default: false)
    pub with_stats: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_lifetime: None,
            with_stats: false,
        }
    }
}
