//! Cragcache - read-through caching for the climbing gym directory
//!
//! TTL-expiring, size-bounded in-memory caches per entity kind, and cache
//! decorators that layer them transparently over the gym, event and user
//! repositories.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheRegistry, MemoryCache};
pub use config::Config;
pub use error::RepositoryError;
pub use tasks::spawn_cleanup_task;
