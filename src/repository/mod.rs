//! Repository Module
//!
//! Data access contracts for gyms, events and users, the cache decorators
//! that wrap them, and an in-memory document store implementing all three.
//!
//! A decorator implements the same trait as the repository it wraps, so
//! callers cannot tell whether a cache layer is present:
//!
//! ```ignore
//! let store = Arc::new(InMemoryStore::new());
//! let caches = Arc::new(CacheRegistry::new());
//! let gyms = CachedGymRepository::new(store.clone(), caches.clone());
//! let gym = gyms.get_gym("gym-1").await?;
//! ```

mod cached_event;
mod cached_gym;
mod cached_user;
mod lists;
mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Event, Gym, User, VerificationStatus};

pub use cached_event::CachedEventRepository;
pub use cached_gym::CachedGymRepository;
pub use cached_user::CachedUserRepository;
pub use lists::CacheEntity;
pub use memory::InMemoryStore;

// == Gym Repository ==
#[async_trait]
pub trait GymRepository: Send + Sync {
    /// Fetches one gym; `Ok(None)` when it does not exist.
    async fn get_gym(&self, id: &str) -> Result<Option<Gym>>;

    async fn get_all_gyms(&self) -> Result<Vec<Gym>>;

    /// Case-insensitive free-text search.
    async fn search_gyms(&self, query: &str) -> Result<Vec<Gym>>;

    /// Batch fetch; unknown ids are skipped and order is not guaranteed.
    async fn get_gyms(&self, ids: &[String]) -> Result<Vec<Gym>>;

    async fn get_favorite_gyms(&self, user_id: &str) -> Result<Vec<Gym>>;

    /// Persists a new gym and returns it with its server-assigned id.
    async fn create_gym(&self, gym: Gym) -> Result<Gym>;

    async fn update_gym(&self, gym: Gym) -> Result<Gym>;

    async fn delete_gym(&self, id: &str) -> Result<()>;

    async fn update_verification_status(
        &self,
        id: &str,
        status: VerificationStatus,
    ) -> Result<Gym>;

    /// Uploads a new image and returns its URL.
    async fn update_gym_image(&self, id: &str, image: Vec<u8>) -> Result<String>;
}

// == Event Repository ==
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn get_event(&self, id: &str) -> Result<Option<Event>>;

    async fn get_events_for_gym(&self, gym_id: &str) -> Result<Vec<Event>>;

    async fn get_favorite_events(&self, user_id: &str) -> Result<Vec<Event>>;

    async fn get_events(&self, ids: &[String]) -> Result<Vec<Event>>;

    async fn create_event(&self, event: Event) -> Result<Event>;

    async fn update_event(&self, event: Event) -> Result<Event>;

    async fn delete_event(&self, id: &str) -> Result<()>;

    async fn set_event_favorite(&self, user_id: &str, event_id: &str, favorite: bool)
        -> Result<()>;

    async fn update_event_image(&self, id: &str, image: Vec<u8>) -> Result<String>;
}

// == User Repository ==
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>>;

    /// The signed-in user, if any.
    async fn get_current_user(&self) -> Result<Option<User>>;

    async fn get_users(&self, ids: &[String]) -> Result<Vec<User>>;

    async fn update_user(&self, user: User) -> Result<User>;

    async fn set_gym_favorite(&self, user_id: &str, gym_id: &str, favorite: bool)
        -> Result<User>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<User>;

    async fn sign_in_with_apple(&self, identity_token: &str) -> Result<User>;

    async fn sign_out(&self) -> Result<()>;
}
