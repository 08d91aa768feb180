//! In-Memory Document Store
//!
//! Stand-in for the remote document database: one collection per entity
//! kind plus accounts and the signed-in session. Implements all three
//! repository contracts so it can sit under the cache decorators.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{RepositoryError, Result};
use crate::models::{Event, Gym, User, VerificationStatus};
use crate::repository::{EventRepository, GymRepository, UserRepository};

// == Store State ==
#[derive(Debug, Default)]
struct StoreState {
    gyms: HashMap<String, Gym>,
    events: HashMap<String, Event>,
    users: HashMap<String, User>,
    /// Login identifier (email or `apple:<token>`) -> (password, user id)
    accounts: HashMap<String, (String, String)>,
    images: HashMap<String, Vec<u8>>,
    current_user: Option<String>,
    next_id: u64,
}

impl StoreState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn store_image(&mut self, collection: &str, id: &str, image: Vec<u8>) -> String {
        let version = self.next_id("img");
        let url = format!("memory://images/{}/{}/{}", collection, id, version);
        self.images.insert(url.clone(), image);
        url
    }

    fn user_mut(&mut self, user_id: &str) -> Result<&mut User> {
        self.users
            .get_mut(user_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user_id)))
    }

    fn create_account(&mut self, login: String, password: &str, user: User) -> User {
        self.accounts
            .insert(login, (password.to_string(), user.id.clone()));
        self.users.insert(user.id.clone(), user.clone());
        self.current_user = Some(user.id.clone());
        user
    }
}

// == In-Memory Store ==
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a few gyms.
    pub async fn with_sample_data() -> Result<Self> {
        let store = Self::new();
        for (name, address) in [
            ("Crux Hall", "1 Chalk Street"),
            ("Boulder Barn", "12 Quarry Road"),
            ("The Lead Wall", "7 Rope Lane"),
        ] {
            let mut gym = Gym::new(name);
            gym.address = address.to_string();
            gym.verification_status = VerificationStatus::Approved;
            store.create_gym(gym).await?;
        }
        info!("Seeded in-memory store with sample gyms");
        Ok(store)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RepositoryError::InvalidRequest(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

fn sorted_by_name(mut gyms: Vec<Gym>) -> Vec<Gym> {
    gyms.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    gyms
}

fn sorted_by_start(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id)));
    events
}

#[async_trait]
impl GymRepository for InMemoryStore {
    async fn get_gym(&self, id: &str) -> Result<Option<Gym>> {
        Ok(self.state.read().await.gyms.get(id).cloned())
    }

    async fn get_all_gyms(&self) -> Result<Vec<Gym>> {
        let state = self.state.read().await;
        Ok(sorted_by_name(state.gyms.values().cloned().collect()))
    }

    async fn search_gyms(&self, query: &str) -> Result<Vec<Gym>> {
        let state = self.state.read().await;
        Ok(sorted_by_name(
            state
                .gyms
                .values()
                .filter(|gym| gym.matches(query))
                .cloned()
                .collect(),
        ))
    }

    async fn get_gyms(&self, ids: &[String]) -> Result<Vec<Gym>> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.gyms.get(id).cloned()).collect())
    }

    async fn get_favorite_gyms(&self, user_id: &str) -> Result<Vec<Gym>> {
        let state = self.state.read().await;
        let user = state
            .users
            .get(user_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user_id)))?;
        Ok(user
            .favorite_gyms
            .iter()
            .filter_map(|id| state.gyms.get(id).cloned())
            .collect())
    }

    async fn create_gym(&self, mut gym: Gym) -> Result<Gym> {
        require_non_empty("name", &gym.name)?;
        let mut state = self.state.write().await;
        gym.id = state.next_id("gym");
        state.gyms.insert(gym.id.clone(), gym.clone());
        Ok(gym)
    }

    async fn update_gym(&self, gym: Gym) -> Result<Gym> {
        require_non_empty("name", &gym.name)?;
        let mut state = self.state.write().await;
        match state.gyms.get_mut(&gym.id) {
            Some(existing) => {
                *existing = gym.clone();
                Ok(gym)
            }
            None => Err(RepositoryError::NotFound(format!("gym {}", gym.id))),
        }
    }

    async fn delete_gym(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.gyms.remove(id).is_none() {
            return Err(RepositoryError::NotFound(format!("gym {}", id)));
        }
        let hosted: Vec<String> = state
            .events
            .values()
            .filter(|event| event.gym_id == id)
            .map(|event| event.id.clone())
            .collect();
        for event_id in &hosted {
            state.events.remove(event_id);
        }
        for user in state.users.values_mut() {
            user.favorite_gyms.retain(|g| g != id);
            user.favorite_events.retain(|e| !hosted.contains(e));
        }
        Ok(())
    }

    async fn update_verification_status(
        &self,
        id: &str,
        status: VerificationStatus,
    ) -> Result<Gym> {
        let mut state = self.state.write().await;
        let gym = state
            .gyms
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("gym {}", id)))?;
        gym.verification_status = status;
        Ok(gym.clone())
    }

    async fn update_gym_image(&self, id: &str, image: Vec<u8>) -> Result<String> {
        let mut state = self.state.write().await;
        if !state.gyms.contains_key(id) {
            return Err(RepositoryError::NotFound(format!("gym {}", id)));
        }
        let url = state.store_image("gyms", id, image);
        if let Some(gym) = state.gyms.get_mut(id) {
            gym.image_url = Some(url.clone());
        }
        Ok(url)
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn get_event(&self, id: &str) -> Result<Option<Event>> {
        Ok(self.state.read().await.events.get(id).cloned())
    }

    async fn get_events_for_gym(&self, gym_id: &str) -> Result<Vec<Event>> {
        let state = self.state.read().await;
        Ok(sorted_by_start(
            state
                .events
                .values()
                .filter(|event| event.gym_id == gym_id)
                .cloned()
                .collect(),
        ))
    }

    async fn get_favorite_events(&self, user_id: &str) -> Result<Vec<Event>> {
        let state = self.state.read().await;
        let user = state
            .users
            .get(user_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user_id)))?;
        Ok(user
            .favorite_events
            .iter()
            .filter_map(|id| state.events.get(id).cloned())
            .collect())
    }

    async fn get_events(&self, ids: &[String]) -> Result<Vec<Event>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.events.get(id).cloned())
            .collect())
    }

    async fn create_event(&self, mut event: Event) -> Result<Event> {
        require_non_empty("title", &event.title)?;
        let mut state = self.state.write().await;
        if !state.gyms.contains_key(&event.gym_id) {
            return Err(RepositoryError::InvalidRequest(format!(
                "unknown gym {}",
                event.gym_id
            )));
        }
        event.id = state.next_id("event");
        state.events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    async fn update_event(&self, event: Event) -> Result<Event> {
        require_non_empty("title", &event.title)?;
        let mut state = self.state.write().await;
        match state.events.get_mut(&event.id) {
            Some(existing) => {
                *existing = event.clone();
                Ok(event)
            }
            None => Err(RepositoryError::NotFound(format!("event {}", event.id))),
        }
    }

    async fn delete_event(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.events.remove(id).is_none() {
            return Err(RepositoryError::NotFound(format!("event {}", id)));
        }
        for user in state.users.values_mut() {
            user.favorite_events.retain(|e| e != id);
        }
        Ok(())
    }

    async fn set_event_favorite(
        &self,
        user_id: &str,
        event_id: &str,
        favorite: bool,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        if !state.events.contains_key(event_id) {
            return Err(RepositoryError::NotFound(format!("event {}", event_id)));
        }
        let user = state.user_mut(user_id)?;
        toggle(&mut user.favorite_events, event_id, favorite);
        Ok(())
    }

    async fn update_event_image(&self, id: &str, image: Vec<u8>) -> Result<String> {
        let mut state = self.state.write().await;
        if !state.events.contains_key(id) {
            return Err(RepositoryError::NotFound(format!("event {}", id)));
        }
        let url = state.store_image("events", id, image);
        if let Some(event) = state.events.get_mut(id) {
            event.image_url = Some(url.clone());
        }
        Ok(url)
    }
}

fn toggle(list: &mut Vec<String>, id: &str, present: bool) {
    let contained = list.iter().any(|existing| existing == id);
    if present && !contained {
        list.push(id.to_string());
    } else if !present {
        list.retain(|existing| existing != id);
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn get_current_user(&self) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .current_user
            .as_ref()
            .and_then(|id| state.users.get(id).cloned()))
    }

    async fn get_users(&self, ids: &[String]) -> Result<Vec<User>> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn update_user(&self, user: User) -> Result<User> {
        let mut state = self.state.write().await;
        let existing = state.user_mut(&user.id)?;
        *existing = user.clone();
        Ok(user)
    }

    async fn set_gym_favorite(&self, user_id: &str, gym_id: &str, favorite: bool) -> Result<User> {
        let mut state = self.state.write().await;
        if !state.gyms.contains_key(gym_id) {
            return Err(RepositoryError::NotFound(format!("gym {}", gym_id)));
        }
        let user = state.user_mut(user_id)?;
        toggle(&mut user.favorite_gyms, gym_id, favorite);
        Ok(user.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let mut state = self.state.write().await;
        let user_id = match state.accounts.get(&email.to_lowercase()) {
            Some((stored, user_id)) if stored == password => user_id.clone(),
            _ => {
                return Err(RepositoryError::Unauthorized(
                    "invalid email or password".to_string(),
                ))
            }
        };
        let user = state.user_mut(&user_id)?.clone();
        state.current_user = Some(user_id);
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<User> {
        require_non_empty("email", email)?;
        require_non_empty("password", password)?;
        let login = email.to_lowercase();
        let mut state = self.state.write().await;
        if state.accounts.contains_key(&login) {
            return Err(RepositoryError::InvalidRequest(format!(
                "account already exists for {}",
                email
            )));
        }
        let mut user = User::new(state.next_id("user"), login.clone());
        user.display_name = display_name.to_string();
        Ok(state.create_account(login, password, user))
    }

    async fn sign_in_with_apple(&self, identity_token: &str) -> Result<User> {
        require_non_empty("identity token", identity_token)?;
        let login = format!("apple:{}", identity_token);
        let mut state = self.state.write().await;

        if let Some((_, user_id)) = state.accounts.get(&login).cloned() {
            let user = state.user_mut(&user_id)?.clone();
            state.current_user = Some(user_id);
            return Ok(user);
        }

        let user = User::new(state.next_id("user"), String::new());
        Ok(state.create_account(login, "", user))
    }

    async fn sign_out(&self) -> Result<()> {
        self.state.write().await.current_user = None;
        Ok(())
    }
}
