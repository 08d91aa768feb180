//! Cached User Repository
//!
//! Profile reads go through the user cache. Authentication calls always reach
//! the wrapped repository; only their resulting user is written to the cache.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{CacheKey, CacheRegistry};
use crate::error::Result;
use crate::models::User;
use crate::repository::lists::{batch_read_through, read_through};
use crate::repository::UserRepository;

// == Cached User Repository ==
pub struct CachedUserRepository<R> {
    inner: Arc<R>,
    caches: Arc<CacheRegistry>,
}

impl<R: UserRepository> CachedUserRepository<R> {
    pub fn new(inner: Arc<R>, caches: Arc<CacheRegistry>) -> Self {
        Self { inner, caches }
    }

    /// Stores a freshly authenticated user under its own key and the session slot.
    fn remember_authenticated(&self, user: &User) {
        let users = self.caches.users();
        users.set(CacheKey::user(&user.id), user.clone());
        users.set(CacheKey::current_user(), user.clone());
        debug!(user_id = %user.id, "cached authenticated user");
    }

    /// Overwrites a user row, and the session row when it is the same user.
    fn remember_written(&self, user: &User) {
        let users = self.caches.users();
        users.set(CacheKey::user(&user.id), user.clone());

        let current_key = CacheKey::current_user();
        if users.peek(&current_key).is_some_and(|current| current.id == user.id) {
            users.set(current_key, user.clone());
        }
    }
}

#[async_trait]
impl<R: UserRepository> UserRepository for CachedUserRepository<R> {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        read_through(self.caches.users(), CacheKey::user(id), || {
            self.inner.get_user(id)
        })
        .await
    }

    async fn get_current_user(&self) -> Result<Option<User>> {
        let current = read_through(self.caches.users(), CacheKey::current_user(), || {
            self.inner.get_current_user()
        })
        .await?;

        if let Some(user) = &current {
            self.caches
                .users()
                .set(CacheKey::user(&user.id), user.clone());
        }
        Ok(current)
    }

    async fn get_users(&self, ids: &[String]) -> Result<Vec<User>> {
        batch_read_through(self.caches.users(), ids, |missing| async move {
            self.inner.get_users(&missing).await
        })
        .await
    }

    async fn update_user(&self, user: User) -> Result<User> {
        let updated = self.inner.update_user(user).await?;
        self.remember_written(&updated);
        self.caches.search().remove_all();
        Ok(updated)
    }

    async fn set_gym_favorite(&self, user_id: &str, gym_id: &str, favorite: bool) -> Result<User> {
        let updated = self.inner.set_gym_favorite(user_id, gym_id, favorite).await?;
        self.remember_written(&updated);
        self.caches
            .search()
            .remove(&CacheKey::favorite_gyms(user_id));
        Ok(updated)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let user = self.inner.sign_in(email, password).await?;
        self.remember_authenticated(&user);
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<User> {
        let user = self.inner.sign_up(email, password, display_name).await?;
        self.remember_authenticated(&user);
        Ok(user)
    }

    async fn sign_in_with_apple(&self, identity_token: &str) -> Result<User> {
        let user = self.inner.sign_in_with_apple(identity_token).await?;
        self.remember_authenticated(&user);
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        self.inner.sign_out().await?;
        self.caches.users().remove(&CacheKey::current_user());
        Ok(())
    }
}
