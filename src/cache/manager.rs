//! Cache Registry Module
//!
//! Owns one `MemoryCache` per entity kind, each with its own TTL and size
//! policy, plus the cross-cache invalidation helpers.
//!
//! Built once at startup and shared as `Arc<CacheRegistry>`; every cache
//! decorator receives the same registry, so there is exactly one cache per
//! entity kind in the process without any global state.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{CacheKey, CacheStats, MemoryCache, Sweep};
use crate::models::{Event, Gym, User};

// == Cache Policy ==
/// TTL and size cap for one cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub time_to_live: Duration,
    pub max_size: usize,
}

impl CachePolicy {
    /// Gym records change rarely.
    pub const GYMS: CachePolicy = CachePolicy::new(Duration::from_secs(6 * 60 * 60), 500);
    /// Events are time-sensitive.
    pub const EVENTS: CachePolicy = CachePolicy::new(Duration::from_secs(2 * 60 * 60), 1000);
    /// User data is auth-adjacent and should go stale quickly.
    pub const USERS: CachePolicy = CachePolicy::new(Duration::from_secs(30 * 60), 200);
    /// Id lists for search, "all" and favorites queries.
    pub const SEARCH: CachePolicy = CachePolicy::new(Duration::from_secs(15 * 60), 100);

    pub const fn new(time_to_live: Duration, max_size: usize) -> Self {
        Self {
            time_to_live,
            max_size,
        }
    }
}

/// Cadence of the background sweep, shared by every cache.
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);

// == Registry Stats ==
/// Per-cache counters, as served by `GET /stats`.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryStats {
    pub gyms: CacheStats,
    pub events: CacheStats,
    pub users: CacheStats,
    pub search: CacheStats,
}

// == Cache Registry ==
#[derive(Debug)]
pub struct CacheRegistry {
    gyms: MemoryCache<Gym>,
    events: MemoryCache<Event>,
    users: MemoryCache<User>,
    search: MemoryCache<Vec<String>>,
}

impl CacheRegistry {
    // == Constructor ==
    /// Creates the four caches with the standard policies.
    pub fn new() -> Self {
        Self::with_policies(
            CachePolicy::GYMS,
            CachePolicy::EVENTS,
            CachePolicy::USERS,
            CachePolicy::SEARCH,
            CLEANUP_INTERVAL,
        )
    }

    /// Creates the four caches with caller-supplied policies.
    pub fn with_policies(
        gyms: CachePolicy,
        events: CachePolicy,
        users: CachePolicy,
        search: CachePolicy,
        cleanup_interval: Duration,
    ) -> Self {
        Self {
            gyms: MemoryCache::with_policy("gyms", gyms, cleanup_interval),
            events: MemoryCache::with_policy("events", events, cleanup_interval),
            users: MemoryCache::with_policy("users", users, cleanup_interval),
            search: MemoryCache::with_policy("search", search, cleanup_interval),
        }
    }

    // == Accessors ==
    pub fn gyms(&self) -> &MemoryCache<Gym> {
        &self.gyms
    }

    pub fn events(&self) -> &MemoryCache<Event> {
        &self.events
    }

    pub fn users(&self) -> &MemoryCache<User> {
        &self.users
    }

    /// Cache of id lists backing collection queries.
    pub fn search(&self) -> &MemoryCache<Vec<String>> {
        &self.search
    }

    // == Bulk Operations ==
    /// Empties every cache (logout, test resets).
    pub fn clear_all_caches(&self) {
        self.gyms.remove_all();
        self.events.remove_all();
        self.users.remove_all();
        self.search.remove_all();
        info!("Cleared all caches");
    }

    /// Sweeps every cache, returning the total number of expired entries removed.
    pub fn cleanup_all_caches(&self) -> usize {
        self.gyms.cleanup_expired_items()
            + self.events.cleanup_expired_items()
            + self.users.cleanup_expired_items()
            + self.search.cleanup_expired_items()
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            gyms: self.gyms.stats(),
            events: self.events.stats(),
            users: self.users.stats(),
            search: self.search.stats(),
        }
    }

    /// Sweep cadence for the whole registry: the shortest interval any cache asks for.
    pub fn cleanup_interval(&self) -> Duration {
        [
            self.gyms.cleanup_interval(),
            self.events.cleanup_interval(),
            self.users.cleanup_interval(),
            self.search.cleanup_interval(),
        ]
        .into_iter()
        .min()
        .unwrap_or(CLEANUP_INTERVAL)
    }

    // == Invalidation ==
    // List results cannot be patched in place, so any change to an entity
    // drops every cached id list along with the entity's own row.

    /// Drops a deleted gym along with the events and user rows its removal cascades into.
    ///
    /// Deleting a gym removes its events and strips them from favorites, and
    /// uncached event ids are unknown here, so every user row goes.
    pub fn invalidate_gym_related_data(&self, gym_id: &str) {
        self.gyms.remove(&CacheKey::gym(gym_id));
        let events = self.events.remove_where(|event| event.gym_id == gym_id);
        self.users.remove_all();
        self.search.remove_all();
        debug!(gym_id, events, "invalidated gym, its events, users and search caches");
    }

    /// Drops a deleted event and every cached user that had it as a favorite.
    pub fn invalidate_event_related_data(&self, event_id: &str) {
        self.events.remove(&CacheKey::event(event_id));
        let users = self
            .users
            .remove_where(|user| user.favorite_events.iter().any(|id| id == event_id));
        self.search.remove_all();
        debug!(event_id, users, "invalidated event, favoriting users and search caches");
    }

    pub fn invalidate_user_related_data(&self, user_id: &str) {
        self.users.remove(&CacheKey::user(user_id));
        self.search.remove_all();
        debug!(user_id, "invalidated user and search caches");
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Sweep for CacheRegistry {
    fn sweep(&self) -> usize {
        self.cleanup_all_caches()
    }

    fn label(&self) -> &str {
        "registry"
    }
}
