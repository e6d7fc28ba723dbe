//! Cache Slot Module
//!
//! A slot is the synchronization-and-result unit for one cache key. It is
//! created in a pending state when the key is reserved, and moves exactly
//! once to a resolved state carrying either a value or a producer error.
//! Any number of waiters can block on the transition; all of them observe
//! the same outcome.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant};

use crate::error::{CacheError, Result};

// == Resolved State ==
/// The immutable payload published by the one-time resolution.
#[derive(Debug)]
struct Resolved<V> {
    /// Value or producer error, delivered identically to every waiter
    outcome: std::result::Result<V, Arc<anyhow::Error>>,
    /// Absolute expiration instant, None = never expires
    expire_at: Option<Instant>,
}

// == Cache Slot ==
/// Pending-or-resolved state for a single cache key.
///
/// The one-shot broadcast signal is a `watch` channel whose value flips from
/// `false` to `true` exactly once. Waiters subscribe and use
/// [`watch::Receiver::wait_for`], which checks the current value before
/// suspending, so a waiter that subscribes after resolution returns
/// immediately and no wake-up can be lost.
///
/// The slot keeps working for callers that still hold an `Arc` to it after
/// the store evicted or replaced it; eviction only affects future lookups.
#[derive(Debug)]
pub(crate) struct Slot<V> {
    /// Resolved payload, written once before the signal is released
    state: OnceLock<Resolved<V>>,
    /// Resolve-once guard; a second resolution is a contract violation
    resolved: AtomicBool,
    /// Broadcast signal, false while pending
    signal: watch::Sender<bool>,
}

impl<V> Slot<V> {
    // == Constructor ==
    /// Creates a new pending slot.
    pub(crate) fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            state: OnceLock::new(),
            resolved: AtomicBool::new(false),
            signal,
        }
    }

    // == Resolve ==
    /// Publishes the slot's final outcome and releases every waiter.
    ///
    /// `expire_at` is computed here, from the resolve instant plus the
    /// lifetime fixed at reservation time; `None` means the slot never
    /// expires. Never blocks on waiters, slow or timed-out readers cannot
    /// delay the resolver.
    ///
    /// # Panics
    /// Panics if called a second time on the same slot. That is a logic bug
    /// in the integrating application, not a recoverable runtime condition.
    pub(crate) fn resolve(&self, outcome: anyhow::Result<V>, lifetime: Option<Duration>) {
        if self
            .resolved
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            panic!("cache slot resolved twice");
        }

        let resolved = Resolved {
            outcome: outcome.map_err(Arc::new),
            expire_at: lifetime.map(|lifetime| Instant::now() + lifetime),
        };

        if self.state.set(resolved).is_err() {
            unreachable!("resolve guard admitted a second resolution");
        }

        // send_replace updates the value even with no live receivers, so
        // waiters subscribing later still observe the release.
        self.signal.send_replace(true);
    }

    // == Is Expired ==
    /// Checks whether the slot's lifetime has elapsed at `now`.
    ///
    /// True iff the slot is resolved with an expiration instant and `now`
    /// is strictly after it. Pending slots and slots resolved without a
    /// lifetime never expire (they can still be evicted by capacity
    /// pressure).
    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        self.state
            .get()
            .and_then(|resolved| resolved.expire_at)
            .is_some_and(|expire_at| now > expire_at)
    }

    // == Is Resolved ==
    /// Returns true once the slot has been resolved.
    pub(crate) fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }
}

impl<V: Clone> Slot<V> {
    // == Wait ==
    /// Waits for the slot to be resolved and returns its outcome.
    ///
    /// Returns immediately if already resolved. `None` waits indefinitely;
    /// `Some(Duration::ZERO)` is a non-blocking poll. On timeout, returns
    /// [`CacheError::GetTimeout`] without disturbing the slot's eventual
    /// resolution.
    pub(crate) async fn wait(&self, timeout: Option<Duration>) -> Result<V> {
        if self.state.get().is_none() {
            let mut signal = self.signal.subscribe();
            let released = signal.wait_for(|released| *released);

            match timeout {
                None => {
                    released
                        .await
                        .expect("signal sender lives as long as the slot");
                }
                Some(budget) => match time::timeout(budget, released).await {
                    Ok(received) => {
                        received.expect("signal sender lives as long as the slot");
                    }
                    Err(_) => return Err(CacheError::GetTimeout),
                },
            }
        }

        let resolved = self
            .state
            .get()
            .expect("signal released before state was published");

        match &resolved.outcome {
            Ok(value) => Ok(value.clone()),
            Err(err) => Err(CacheError::Producer(Arc::clone(err))),
        }
    }
}
