//! Cache Module
//!
//! In-memory caching with TTL expiration and LRU eviction, one cache per
//! entity kind, owned by a shared `CacheRegistry`.

mod item;
mod keys;
mod lru;
mod manager;
mod memory;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use item::CachedItem;
pub use keys::{normalize_query, CacheKey};
pub use lru::AccessOrder;
pub use manager::{CachePolicy, CacheRegistry, RegistryStats, CLEANUP_INTERVAL};
pub use memory::{MemoryCache, Sweep};
pub use stats::CacheStats;
