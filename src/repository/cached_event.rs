//! Cached Event Repository

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::{CacheKey, CacheRegistry};
use crate::error::Result;
use crate::models::Event;
use crate::repository::lists::{batch_read_through, read_through, resolve_list, store_list};
use crate::repository::EventRepository;

// == Cached Event Repository ==
/// Cache-aside decorator over any `EventRepository`.
pub struct CachedEventRepository<R> {
    inner: Arc<R>,
    caches: Arc<CacheRegistry>,
}

impl<R: EventRepository> CachedEventRepository<R> {
    pub fn new(inner: Arc<R>, caches: Arc<CacheRegistry>) -> Self {
        Self { inner, caches }
    }

    async fn cached_list<F, Fut>(&self, list_key: String, fetch: F) -> Result<Vec<Event>>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Vec<Event>>> + Send,
    {
        let search = self.caches.search();
        let events = self.caches.events();

        if let Some(hit) = resolve_list(search, events, &list_key) {
            return Ok(hit);
        }

        let fetched = fetch().await?;
        store_list(search, events, &list_key, &fetched);
        Ok(fetched)
    }

    fn remember_written(&self, event: &Event) {
        self.caches
            .events()
            .set(CacheKey::event(&event.id), event.clone());
        self.caches.search().remove_all();
    }
}

#[async_trait]
impl<R: EventRepository> EventRepository for CachedEventRepository<R> {
    async fn get_event(&self, id: &str) -> Result<Option<Event>> {
        read_through(self.caches.events(), CacheKey::event(id), || {
            self.inner.get_event(id)
        })
        .await
    }

    async fn get_events_for_gym(&self, gym_id: &str) -> Result<Vec<Event>> {
        self.cached_list(CacheKey::gym_events(gym_id), || {
            self.inner.get_events_for_gym(gym_id)
        })
        .await
    }

    async fn get_favorite_events(&self, user_id: &str) -> Result<Vec<Event>> {
        self.cached_list(CacheKey::favorite_events(user_id), || {
            self.inner.get_favorite_events(user_id)
        })
        .await
    }

    async fn get_events(&self, ids: &[String]) -> Result<Vec<Event>> {
        batch_read_through(self.caches.events(), ids, |missing| async move {
            self.inner.get_events(&missing).await
        })
        .await
    }

    async fn create_event(&self, event: Event) -> Result<Event> {
        let created = self.inner.create_event(event).await?;
        self.remember_written(&created);
        Ok(created)
    }

    async fn update_event(&self, event: Event) -> Result<Event> {
        let updated = self.inner.update_event(event).await?;
        self.remember_written(&updated);
        Ok(updated)
    }

    async fn delete_event(&self, id: &str) -> Result<()> {
        self.inner.delete_event(id).await?;
        self.caches.invalidate_event_related_data(id);
        Ok(())
    }

    async fn set_event_favorite(
        &self,
        user_id: &str,
        event_id: &str,
        favorite: bool,
    ) -> Result<()> {
        self.inner
            .set_event_favorite(user_id, event_id, favorite)
            .await?;

        // Only this user's favorites list and user record changed.
        self.caches
            .search()
            .remove(&CacheKey::favorite_events(user_id));
        self.caches.users().remove(&CacheKey::user(user_id));
        self.caches.users().remove(&CacheKey::current_user());
        Ok(())
    }

    async fn update_event_image(&self, id: &str, image: Vec<u8>) -> Result<String> {
        let url = self.inner.update_event_image(id, image).await?;
        self.caches.events().remove(&CacheKey::event(id));
        Ok(url)
    }
}
