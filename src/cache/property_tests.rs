//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to check the bounded store against a straightforward
//! reference model and the slot against its lifetime invariants.

use std::collections::HashMap;
use std::time::Duration;

use proptest::prelude::*;
use tokio::time::Instant;

use crate::cache::slot::Slot;
use crate::cache::store::BoundedStore;

// == Test Configuration ==
const MODEL_CAPACITY: usize = 8;

// == Strategies ==
/// Small key space so sequences revisit keys and trigger evictions.
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..16
}

/// A sequence of store operations.
#[derive(Debug, Clone)]
enum StoreOp {
    Insert { key: u8, value: u32 },
    Lookup { key: u8 },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), any::<u32>()).prop_map(|(key, value)| StoreOp::Insert { key, value }),
        key_strategy().prop_map(|key| StoreOp::Lookup { key }),
    ]
}

// == Reference Model ==
/// Map plus an explicit recency list, front = most recently used.
#[derive(Debug, Default)]
struct ModelStore {
    entries: HashMap<u8, u32>,
    recency: Vec<u8>,
}

impl ModelStore {
    fn touch(&mut self, key: u8) {
        self.recency.retain(|k| *k != key);
        self.recency.insert(0, key);
    }

    fn insert(&mut self, key: u8, value: u32) -> Option<(u8, u32)> {
        let mut evicted = None;
        if !self.entries.contains_key(&key) && self.entries.len() >= MODEL_CAPACITY {
            let oldest = self.recency.pop().unwrap();
            let old_value = self.entries.remove(&oldest).unwrap();
            evicted = Some((oldest, old_value));
        }
        self.entries.insert(key, value);
        self.touch(key);
        evicted
    }

    fn lookup(&mut self, key: u8) -> Option<u32> {
        if self.entries.contains_key(&key) {
            self.touch(key);
        }
        self.entries.get(&key).copied()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // For any operation sequence, the store agrees with the reference model
    // on every lookup result, every eviction, and the final entry count.
    #[test]
    fn prop_store_matches_reference_model(
        ops in prop::collection::vec(store_op_strategy(), 1..200)
    ) {
        let mut store = BoundedStore::new(MODEL_CAPACITY);
        let mut model = ModelStore::default();

        for op in ops {
            match op {
                StoreOp::Insert { key, value } => {
                    let evicted = store.insert(key, value);
                    let expected = model.insert(key, value);
                    prop_assert_eq!(evicted, expected, "eviction mismatch");
                }
                StoreOp::Lookup { key } => {
                    let found = store.lookup(&key).copied();
                    let expected = model.lookup(key);
                    prop_assert_eq!(found, expected, "lookup mismatch");
                }
            }
            prop_assert!(store.len() <= MODEL_CAPACITY, "capacity exceeded");
            prop_assert_eq!(store.len(), model.entries.len(), "length mismatch");
        }
    }

    // Capacity pressure always evicts exactly one entry, and only for
    // inserts of new keys.
    #[test]
    fn prop_insert_at_capacity_evicts_exactly_one(
        keys in prop::collection::vec(key_strategy(), MODEL_CAPACITY..64)
    ) {
        let mut store = BoundedStore::new(MODEL_CAPACITY);

        for key in keys {
            let was_present = store.lookup(&key).is_some();
            let at_capacity = store.len() == MODEL_CAPACITY;
            let evicted = store.insert(key, 0u32);

            if was_present || !at_capacity {
                prop_assert!(evicted.is_none());
            } else {
                prop_assert!(evicted.is_some());
            }
        }
    }

    // A slot resolved with any lifetime is fresh at resolution and stale
    // well past the lifetime; a slot resolved without one never expires.
    #[test]
    fn prop_slot_lifetime(lifetime_secs in prop::option::of(0u64..3600)) {
        let slot: Slot<u32> = Slot::new();
        let before = Instant::now();
        slot.resolve(Ok(1), lifetime_secs.map(Duration::from_secs));

        prop_assert!(!slot.is_expired(before));

        let far_future = before + Duration::from_secs(3600 * 24);
        match lifetime_secs {
            Some(_) => prop_assert!(slot.is_expired(far_future)),
            None => prop_assert!(!slot.is_expired(far_future)),
        }
    }
}
