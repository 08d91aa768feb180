//! Read-through helpers shared by the cache decorators.
//!
//! Collection queries are cached as lists of ids in the search cache; the
//! entities themselves live in their per-kind cache. A list is only served
//! when every id still resolves, otherwise the whole query is a miss.

use std::collections::HashSet;
use std::future::Future;

use tracing::debug;

use crate::cache::{CacheKey, MemoryCache};
use crate::error::Result;
use crate::models::{Event, Gym, User};

// == Cache Entity ==
/// A value type cached by id.
pub trait CacheEntity: Clone + Send + Sync + 'static {
    fn entity_id(&self) -> &str;

    fn cache_key(id: &str) -> String;
}

impl CacheEntity for Gym {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn cache_key(id: &str) -> String {
        CacheKey::gym(id)
    }
}

impl CacheEntity for Event {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn cache_key(id: &str) -> String {
        CacheKey::event(id)
    }
}

impl CacheEntity for User {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn cache_key(id: &str) -> String {
        CacheKey::user(id)
    }
}

// == Id Lists ==
/// Resolves a cached id list through the entity cache.
///
/// Returns `None` if the list is absent or any id no longer resolves.
pub(crate) fn resolve_list<T: CacheEntity>(
    search: &MemoryCache<Vec<String>>,
    entities: &MemoryCache<T>,
    list_key: &str,
) -> Option<Vec<T>> {
    let ids = search.get(list_key)?;

    let mut resolved = Vec::with_capacity(ids.len());
    for id in &ids {
        match entities.get(&T::cache_key(id)) {
            Some(entity) => resolved.push(entity),
            None => {
                debug!(list_key, id = %id, "id list partially decayed, treating as miss");
                return None;
            }
        }
    }

    debug!(list_key, count = resolved.len(), "id list cache hit");
    Some(resolved)
}

/// Caches each entity and the id list for the query.
pub(crate) fn store_list<T: CacheEntity>(
    search: &MemoryCache<Vec<String>>,
    entities: &MemoryCache<T>,
    list_key: &str,
    items: &[T],
) {
    for item in items {
        entities.set(T::cache_key(item.entity_id()), item.clone());
    }
    let ids = items.iter().map(|i| i.entity_id().to_string()).collect();
    search.set(list_key, ids);
}

// == Single Reads ==
/// Cache-aside lookup for one entity; only found entities are cached.
pub(crate) async fn read_through<T, F, Fut>(
    entities: &MemoryCache<T>,
    key: String,
    fetch: F,
) -> Result<Option<T>>
where
    T: CacheEntity,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    if let Some(hit) = entities.get(&key) {
        debug!(%key, "cache hit");
        return Ok(Some(hit));
    }

    debug!(%key, "cache miss");
    let fetched = fetch().await?;
    if let Some(entity) = &fetched {
        entities.set(key, entity.clone());
    }
    Ok(fetched)
}

// == Batch Reads ==
/// Serves cached ids directly and fetches the rest in one batched call.
pub(crate) async fn batch_read_through<T, F, Fut>(
    entities: &MemoryCache<T>,
    ids: &[String],
    fetch: F,
) -> Result<Vec<T>>
where
    T: CacheEntity,
    F: FnOnce(Vec<String>) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut found = Vec::with_capacity(ids.len());
    let mut missing = Vec::new();
    let mut seen = HashSet::new();

    for id in ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        match entities.get(&T::cache_key(id)) {
            Some(entity) => found.push(entity),
            None => missing.push(id.clone()),
        }
    }

    debug!(cached = found.len(), missing = missing.len(), "batch lookup");
    if missing.is_empty() {
        return Ok(found);
    }

    let fetched = fetch(missing).await?;
    for entity in &fetched {
        entities.set(T::cache_key(entity.entity_id()), entity.clone());
    }
    found.extend(fetched);
    Ok(found)
}
