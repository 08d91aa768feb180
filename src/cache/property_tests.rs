//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the size, membership and recency properties of
//! `MemoryCache` over arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::MemoryCache;

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 100;
const TEST_TTL: Duration = Duration::from_secs(300);
const TEST_CLEANUP: Duration = Duration::from_secs(60);

fn new_cache(max_size: usize) -> MemoryCache<String> {
    MemoryCache::new("prop", max_size, TEST_TTL, TEST_CLEANUP)
}

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9:]{1,24}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    SetExpired { key: String, value: String },
    Get { key: String },
    Remove { key: String },
    Cleanup,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        1 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::SetExpired { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => Just(CacheOp::Cleanup),
    ]
}

fn apply(cache: &MemoryCache<String>, op: CacheOp) {
    match op {
        CacheOp::Set { key, value } => cache.set(key, value),
        CacheOp::SetExpired { key, value } => cache.set_with_ttl(key, value, Duration::ZERO),
        CacheOp::Get { key } => {
            cache.get(&key);
        }
        CacheOp::Remove { key } => {
            cache.remove(&key);
        }
        CacheOp::Cleanup => {
            cache.cleanup_expired_items();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Size never exceeds the cap after any completed operation, and the
    // recency order always holds exactly the stored keys.
    #[test]
    fn prop_size_and_membership_invariants(
        max_size in 1usize..12,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let cache = new_cache(max_size);

        for op in ops {
            apply(&cache, op);

            let keys = cache.keys();
            let unique: HashSet<&String> = keys.iter().collect();
            prop_assert!(cache.count() <= max_size);
            prop_assert_eq!(keys.len(), cache.count());
            prop_assert_eq!(unique.len(), keys.len(), "duplicate keys in access order");
        }
    }

    // The most recent set wins.
    #[test]
    fn prop_last_set_wins(
        key in key_strategy(),
        values in prop::collection::vec(value_strategy(), 1..10)
    ) {
        let cache = new_cache(TEST_MAX_SIZE);

        for value in &values {
            cache.set(key.clone(), value.clone());
        }

        prop_assert_eq!(cache.get(&key), values.last().cloned());
        prop_assert_eq!(cache.count(), 1);
    }

    // remove is idempotent and a later get misses.
    #[test]
    fn prop_remove_then_get_misses(key in key_strategy(), value in value_strategy()) {
        let cache = new_cache(TEST_MAX_SIZE);
        cache.set(key.clone(), value.clone());

        prop_assert_eq!(cache.remove(&key), Some(value));
        prop_assert_eq!(cache.get(&key), None);
        prop_assert_eq!(cache.remove(&key), None);
    }

    // Inserting one key past capacity evicts exactly the least recently used key.
    #[test]
    fn prop_overflow_evicts_least_recently_used(
        keys in prop::collection::hash_set(key_strategy(), 2..10),
        touched in any::<prop::sample::Index>(),
        new_key in key_strategy()
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        prop_assume!(!keys.contains(&new_key));

        let cache = new_cache(keys.len());
        for key in &keys {
            cache.set(key.clone(), format!("value_{}", key));
        }

        // Touch one key; the oldest of the rest becomes the victim.
        let touched_key = touched.get(&keys).clone();
        cache.get(&touched_key);
        let victim = keys
            .iter()
            .find(|k| **k != touched_key)
            .cloned()
            .unwrap();

        cache.set(new_key.clone(), "new".to_string());

        prop_assert_eq!(cache.count(), keys.len());
        prop_assert!(!cache.keys().contains(&victim), "expected {} evicted", victim);
        prop_assert!(cache.contains(&touched_key));
        prop_assert!(cache.contains(&new_key));
        for key in keys.iter().filter(|k| **k != victim) {
            prop_assert!(cache.contains(key), "{} should survive", key);
        }
    }

    // Expired entries never come back from get and are gone right after it.
    #[test]
    fn prop_expired_entries_are_never_served(
        live in prop::collection::hash_set(key_strategy(), 0..10),
        expired in prop::collection::hash_set(key_strategy(), 0..10)
    ) {
        let cache = new_cache(TEST_MAX_SIZE);
        let expired: Vec<String> = expired.difference(&live).cloned().collect();

        for key in &live {
            cache.set(key.clone(), "live".to_string());
        }
        for key in &expired {
            cache.set_with_ttl(key.clone(), "stale".to_string(), Duration::ZERO);
        }

        for key in &expired {
            prop_assert_eq!(cache.get(key), None);
            prop_assert!(!cache.keys().contains(key));
        }
        for key in &live {
            prop_assert_eq!(cache.get(key), Some("live".to_string()));
        }
        prop_assert_eq!(cache.cleanup_expired_items(), 0);
        prop_assert_eq!(cache.count(), live.len());
    }

    // Concurrent writers and readers leave the cache within its cap and consistent.
    #[test]
    fn prop_concurrent_operation_correctness(
        ops in prop::collection::vec(cache_op_strategy(), 10..80)
    ) {
        let cache = Arc::new(new_cache(8));

        tokio_test::block_on(async {
            let handles: Vec<_> = ops
                .into_iter()
                .map(|op| {
                    let cache = Arc::clone(&cache);
                    tokio::task::spawn_blocking(move || apply(&cache, op))
                })
                .collect();

            for handle in handles {
                handle.await.expect("task should not panic");
            }
        });

        let keys = cache.keys();
        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert!(cache.count() <= 8);
        prop_assert_eq!(keys.len(), cache.count());
        prop_assert_eq!(unique.len(), keys.len());
    }
}
