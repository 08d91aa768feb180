//! Memory Cache Module
//!
//! Generic, thread-safe cache engine combining HashMap storage with recency
//! tracking, TTL expiration and a hard size cap.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::cache::{AccessOrder, CachePolicy, CacheStats, CachedItem};

// == Sweep ==
/// Something that can drop its expired entries on demand.
///
/// Implemented by every `MemoryCache` and by the `CacheRegistry` as a whole,
/// so the background cleanup task can drive either.
pub trait Sweep: Send + Sync {
    /// Removes expired entries and returns how many were dropped.
    fn sweep(&self) -> usize;

    /// Short name used in log lines.
    fn label(&self) -> &str;
}

// == Inner State ==
/// Storage, recency order and counters, always mutated together under one lock.
#[derive(Debug)]
struct Inner<T> {
    storage: HashMap<String, CachedItem<T>>,
    access_order: AccessOrder,
    stats: CacheStats,
}

impl<T> Inner<T> {
    fn new() -> Self {
        Self {
            storage: HashMap::new(),
            access_order: AccessOrder::new(),
            stats: CacheStats::new(),
        }
    }

    fn discard(&mut self, key: &str) -> Option<CachedItem<T>> {
        let removed = self.storage.remove(key);
        self.access_order.remove(key);
        removed
    }

    fn sync_entry_count(&mut self) {
        let count = self.storage.len();
        self.stats.set_total_entries(count);
    }
}

// == Memory Cache ==
/// Bounded key/value cache with per-item TTL and least-recently-used eviction.
///
/// Every operation takes the same internal mutex, so `storage` and the
/// access order never disagree on membership. Nothing here performs I/O;
/// all operations run in time proportional to the current entry count.
#[derive(Debug)]
pub struct MemoryCache<T> {
    name: String,
    inner: Mutex<Inner<T>>,
    max_size: usize,
    default_time_to_live: Duration,
    cleanup_interval: Duration,
}

impl<T: Clone> MemoryCache<T> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `name` - Label used in logs and stats
    /// * `max_size` - Hard entry cap (clamped to at least 1)
    /// * `default_time_to_live` - TTL applied by `set`
    /// * `cleanup_interval` - Cadence for the background sweep
    pub fn new(
        name: impl Into<String>,
        max_size: usize,
        default_time_to_live: Duration,
        cleanup_interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            inner: Mutex::new(Inner::new()),
            max_size: max_size.max(1),
            default_time_to_live,
            cleanup_interval,
        }
    }

    /// Creates an empty cache configured from a `CachePolicy`.
    pub fn with_policy(
        name: impl Into<String>,
        policy: CachePolicy,
        cleanup_interval: Duration,
    ) -> Self {
        Self::new(
            name,
            policy.max_size,
            policy.time_to_live,
            cleanup_interval,
        )
    }

    // A panic while holding the lock cannot leave storage and order
    // out of step (every mutation updates both before returning), so a
    // poisoned lock is safe to keep using.
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Set ==
    /// Stores a value under `key` with the cache's default TTL.
    pub fn set(&self, key: impl Into<String>, value: T) {
        self.set_with_ttl(key, value, self.default_time_to_live);
    }

    /// Stores a value under `key` with an explicit TTL.
    ///
    /// Overwrites any previous entry (restarting its TTL), marks the key as
    /// most recently used, then evicts least recently used keys until the
    /// cache is back within `max_size`.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: T, time_to_live: Duration) {
        let key = key.into();
        let mut inner = self.lock();

        inner
            .storage
            .insert(key.clone(), CachedItem::new(value, time_to_live));
        inner.access_order.touch(&key);

        while inner.storage.len() > self.max_size {
            let Some(oldest) = inner.access_order.pop_oldest() else {
                break;
            };
            inner.storage.remove(&oldest);
            inner.stats.record_eviction();
            debug!(cache = %self.name, key = %oldest, "evicted least recently used entry");
        }

        inner.sync_entry_count();
    }

    // == Get ==
    /// Returns the value for `key` if present and not expired.
    ///
    /// An expired entry is removed as a side effect and reported as a miss.
    /// A hit marks the key as most recently used.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut guard = self.lock();
        let inner = &mut *guard;

        let expired = match inner.storage.get(key) {
            Some(item) if !item.is_expired() => {
                debug!(
                    cache = %self.name,
                    key,
                    cached_at = %item.cached_at_utc(),
                    "cache hit"
                );
                let value = item.value().clone();
                inner.access_order.touch(key);
                inner.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.discard(key);
            inner.stats.record_expirations(1);
            inner.sync_entry_count();
            debug!(cache = %self.name, key, "dropped expired entry on read");
        }
        inner.stats.record_miss();
        None
    }

    // == Peek ==
    /// Returns the value for `key` if live, without touching recency or stats.
    ///
    /// Expired entries are left for the next `get` or sweep.
    pub fn peek(&self, key: &str) -> Option<T> {
        self.lock()
            .storage
            .get(key)
            .filter(|item| !item.is_expired())
            .map(|item| item.value().clone())
    }

    // == Contains ==
    /// Equivalent to `get(key).is_some()`, including lazy expiry.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Remove ==
    /// Deletes the entry for `key`, expired or not, returning its value.
    pub fn remove(&self, key: &str) -> Option<T> {
        let mut inner = self.lock();
        let removed = inner.discard(key).map(CachedItem::into_value);
        inner.sync_entry_count();
        removed
    }

    // == Remove All ==
    pub fn remove_all(&self) {
        let mut inner = self.lock();
        inner.storage.clear();
        inner.access_order.clear();
        inner.sync_entry_count();
    }

    // == Remove Where ==
    /// Deletes every entry whose value matches `predicate`, returning how many went.
    pub fn remove_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        let mut inner = self.lock();

        let matching: Vec<String> = inner
            .storage
            .iter()
            .filter(|(_, item)| predicate(item.value()))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &matching {
            inner.discard(key);
        }

        inner.sync_entry_count();
        matching.len()
    }

    // == Cleanup Expired ==
    /// Removes every expired entry and returns the number removed.
    pub fn cleanup_expired_items(&self) -> usize {
        let mut inner = self.lock();

        let expired: Vec<String> = inner
            .storage
            .iter()
            .filter(|(_, item)| item.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.discard(key);
        }

        inner.stats.record_expirations(expired.len());
        inner.sync_entry_count();
        expired.len()
    }

    // == Introspection ==
    /// Current number of entries, expired-but-unswept ones included.
    pub fn count(&self) -> usize {
        self.lock().storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Snapshot of the stored keys, least recently used first.
    pub fn keys(&self) -> Vec<String> {
        self.lock()
            .access_order
            .iter()
            .map(str::to_string)
            .collect()
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.storage.len());
        stats
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_time_to_live(&self) -> Duration {
        self.default_time_to_live
    }

    pub fn cleanup_interval(&self) -> Duration {
        self.cleanup_interval
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        let inner = self.lock();
        assert_eq!(inner.storage.len(), inner.access_order.len());
        for key in inner.access_order.iter() {
            assert!(inner.storage.contains_key(key), "orphan key {key}");
        }
        assert!(inner.storage.len() <= self.max_size);
    }
}

impl<T: Clone + Send> Sweep for MemoryCache<T> {
    fn sweep(&self) -> usize {
        self.cleanup_expired_items()
    }

    fn label(&self) -> &str {
        &self.name
    }
}
