//! Cached Item Module
//!
//! Defines the immutable wrapper pairing a cached value with its insertion time and TTL.

use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};

// == Cached Item ==
/// A single cached value with its insertion time and time-to-live.
///
/// Items are never mutated after construction; re-setting a key replaces the
/// item wholesale, which also restarts its TTL clock.
#[derive(Debug, Clone)]
pub struct CachedItem<T> {
    value: T,
    cached_at: SystemTime,
    time_to_live: Duration,
}

impl<T> CachedItem<T> {
    // == Constructor ==
    /// Creates a new item stamped with the current wall-clock time.
    pub fn new(value: T, time_to_live: Duration) -> Self {
        Self::with_timestamp(value, SystemTime::now(), time_to_live)
    }

    /// Creates an item with an explicit insertion time.
    pub fn with_timestamp(value: T, cached_at: SystemTime, time_to_live: Duration) -> Self {
        Self {
            value,
            cached_at,
            time_to_live,
        }
    }

    // == Accessors ==
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn cached_at(&self) -> SystemTime {
        self.cached_at
    }

    /// Insertion time as a UTC timestamp, for display.
    pub fn cached_at_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.cached_at)
    }

    pub fn time_to_live(&self) -> Duration {
        self.time_to_live
    }

    // == Expiration ==
    /// Instant after which the item is stale.
    ///
    /// Returns `None` when `cached_at + time_to_live` is not representable,
    /// in which case the item never expires.
    pub fn expires_at(&self) -> Option<SystemTime> {
        self.cached_at.checked_add(self.time_to_live)
    }

    /// Checks if the item has expired.
    ///
    /// An item is live only while `now < expires_at`. The boundary instant
    /// itself counts as expired, so a zero TTL item is stale from the moment
    /// it is created regardless of clock resolution.
    pub fn is_expired(&self) -> bool {
        match self.expires_at() {
            Some(expires_at) => SystemTime::now() >= expires_at,
            None => false,
        }
    }

    /// Remaining lifetime, or `Duration::ZERO` once expired.
    pub fn time_until_expiration(&self) -> Duration {
        match self.expires_at() {
            Some(expires_at) => expires_at
                .duration_since(SystemTime::now())
                .unwrap_or(Duration::ZERO),
            None => Duration::MAX,
        }
    }
}
