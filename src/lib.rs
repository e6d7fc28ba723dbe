//! Oneflight - a single-flight in-memory cache
//!
//! Guarantees at-most-one concurrent producer per key: the first caller to
//! reserve a missing key produces its value, everyone else waits on the
//! pending slot and shares the outcome. Memory is bounded by LRU eviction
//! and entries can carry a time-to-live.
//!
//! ```no_run
//! use oneflight::{Cache, CacheConfig, CacheError};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let cache: Cache<String, String> = Cache::new(CacheConfig::default())?;
//!
//! match cache.get(&"user:42".to_string()).await {
//!     Ok(value) => println!("cached: {value}"),
//!     Err(CacheError::EntryNotFound) | Err(CacheError::Expired) => {
//!         let handle = cache.reserve("user:42".to_string());
//!         // ... fetch from the backend, possibly in another task ...
//!         handle.resolve(Ok("alice".to_string()));
//!     }
//!     Err(err) => return Err(err.into()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, ResolveHandle, StatsSnapshot, DEFAULT_CAPACITY};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
