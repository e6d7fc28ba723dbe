//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::sync::Arc;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// All variants are recoverable sentinel values returned to callers; none of
/// them carries a stack trace. The one contract violation the crate knows
/// about, resolving the same slot twice, panics instead of surfacing here.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// No slot is registered under the requested key; the caller is expected
    /// to reserve the key and produce the value itself.
    #[error("entry not found")]
    EntryNotFound,

    /// The slot exists but its lifetime has elapsed; a fresh reservation is
    /// needed to repopulate the key.
    #[error("entry expired")]
    Expired,

    /// This wait exceeded its budget. The producer may still be working and
    /// other waiters are unaffected.
    #[error("get cache timeout")]
    GetTimeout,

    /// Cache construction was given a zero capacity.
    #[error("invalid capacity: {0} (must be > 0)")]
    InvalidCapacity(usize),

    /// The error the producer supplied at resolve time, passed through
    /// verbatim to every waiter until the slot is replaced or evicted.
    #[error("producer error: {0}")]
    Producer(Arc<anyhow::Error>),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
