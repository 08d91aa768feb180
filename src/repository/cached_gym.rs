//! Cached Gym Repository
//!
//! Cache-aside decorator over any `GymRepository`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{CacheKey, CacheRegistry};
use crate::error::Result;
use crate::models::{Gym, VerificationStatus};
use crate::repository::lists::{batch_read_through, read_through, resolve_list, store_list};
use crate::repository::GymRepository;

// == Cached Gym Repository ==
/// Serves gym reads from the registry's gym cache and keeps it in step with writes.
///
/// Reads are authoritative for the TTL window; errors from the wrapped
/// repository pass through and are never cached.
pub struct CachedGymRepository<R> {
    inner: Arc<R>,
    caches: Arc<CacheRegistry>,
}

impl<R: GymRepository> CachedGymRepository<R> {
    pub fn new(inner: Arc<R>, caches: Arc<CacheRegistry>) -> Self {
        Self { inner, caches }
    }

    async fn cached_list<F, Fut>(&self, list_key: String, fetch: F) -> Result<Vec<Gym>>
    where
        F: FnOnce() -> Fut + Send,
        Fut: std::future::Future<Output = Result<Vec<Gym>>> + Send,
    {
        let search = self.caches.search();
        let gyms = self.caches.gyms();

        if let Some(hit) = resolve_list(search, gyms, &list_key) {
            return Ok(hit);
        }

        let fetched = fetch().await?;
        store_list(search, gyms, &list_key, &fetched);
        Ok(fetched)
    }

    /// Caches a written gym and drops every cached list.
    fn remember_written(&self, gym: &Gym) {
        self.caches.gyms().set(CacheKey::gym(&gym.id), gym.clone());
        self.caches.search().remove_all();
    }
}

#[async_trait]
impl<R: GymRepository> GymRepository for CachedGymRepository<R> {
    async fn get_gym(&self, id: &str) -> Result<Option<Gym>> {
        read_through(self.caches.gyms(), CacheKey::gym(id), || {
            self.inner.get_gym(id)
        })
        .await
    }

    async fn get_all_gyms(&self) -> Result<Vec<Gym>> {
        self.cached_list(CacheKey::all_gyms(), || self.inner.get_all_gyms())
            .await
    }

    async fn search_gyms(&self, query: &str) -> Result<Vec<Gym>> {
        self.cached_list(CacheKey::gym_search(query), || {
            self.inner.search_gyms(query)
        })
        .await
    }

    async fn get_gyms(&self, ids: &[String]) -> Result<Vec<Gym>> {
        batch_read_through(self.caches.gyms(), ids, |missing| async move {
            self.inner.get_gyms(&missing).await
        })
        .await
    }

    async fn get_favorite_gyms(&self, user_id: &str) -> Result<Vec<Gym>> {
        self.cached_list(CacheKey::favorite_gyms(user_id), || {
            self.inner.get_favorite_gyms(user_id)
        })
        .await
    }

    async fn create_gym(&self, gym: Gym) -> Result<Gym> {
        let created = self.inner.create_gym(gym).await?;
        self.remember_written(&created);
        debug!(gym_id = %created.id, "cached created gym");
        Ok(created)
    }

    async fn update_gym(&self, gym: Gym) -> Result<Gym> {
        let updated = self.inner.update_gym(gym).await?;
        self.remember_written(&updated);
        Ok(updated)
    }

    async fn delete_gym(&self, id: &str) -> Result<()> {
        self.inner.delete_gym(id).await?;
        self.caches.invalidate_gym_related_data(id);
        Ok(())
    }

    async fn update_verification_status(
        &self,
        id: &str,
        status: VerificationStatus,
    ) -> Result<Gym> {
        let updated = self.inner.update_verification_status(id, status).await?;
        self.remember_written(&updated);
        Ok(updated)
    }

    async fn update_gym_image(&self, id: &str, image: Vec<u8>) -> Result<String> {
        let url = self.inner.update_gym_image(id, image).await?;
        // Evict rather than patch; the next read picks up the new image.
        self.caches.gyms().remove(&CacheKey::gym(id));
        Ok(url)
    }
}
