//! API Handlers
//!
//! HTTP request handlers. Every data read and write goes through the cache
//! decorators, never to the store directly.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::CacheRegistry;
use crate::error::{RepositoryError, Result};
use crate::models::{
    CleanupResponse, Event, Gym, GymQuery, HealthResponse, MessageResponse, StatsResponse, User,
    VerificationRequest,
};
use crate::repository::{
    CachedEventRepository, CachedGymRepository, CachedUserRepository, EventRepository,
    GymRepository, InMemoryStore, UserRepository,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub caches: Arc<CacheRegistry>,
    pub gyms: Arc<CachedGymRepository<InMemoryStore>>,
    pub events: Arc<CachedEventRepository<InMemoryStore>>,
    pub users: Arc<CachedUserRepository<InMemoryStore>>,
}

impl AppState {
    /// Wires the cache decorators over a shared store and registry.
    pub fn new(store: Arc<InMemoryStore>, caches: Arc<CacheRegistry>) -> Self {
        Self {
            gyms: Arc::new(CachedGymRepository::new(store.clone(), caches.clone())),
            events: Arc::new(CachedEventRepository::new(store.clone(), caches.clone())),
            users: Arc::new(CachedUserRepository::new(store, caches.clone())),
            caches,
        }
    }
}

fn found<T>(value: Option<T>, what: &str, id: &str) -> Result<Json<T>> {
    value
        .map(Json)
        .ok_or_else(|| RepositoryError::NotFound(format!("{} {}", what, id)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.caches.stats().into())
}

/// Handler for POST /cache/clear
pub async fn clear_caches_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.caches.clear_all_caches();
    Json(MessageResponse::new("All caches cleared"))
}

/// Handler for POST /cache/cleanup
pub async fn cleanup_caches_handler(State(state): State<AppState>) -> Json<CleanupResponse> {
    Json(CleanupResponse {
        removed: state.caches.cleanup_all_caches(),
    })
}

/// Handler for GET /gyms (optionally `?q=` to search)
pub async fn list_gyms_handler(
    State(state): State<AppState>,
    Query(query): Query<GymQuery>,
) -> Result<Json<Vec<Gym>>> {
    let gyms = match query.search_text() {
        Some(text) => state.gyms.search_gyms(text).await?,
        None => state.gyms.get_all_gyms().await?,
    };
    Ok(Json(gyms))
}

/// Handler for POST /gyms
pub async fn create_gym_handler(
    State(state): State<AppState>,
    Json(gym): Json<Gym>,
) -> Result<(StatusCode, Json<Gym>)> {
    let created = state.gyms.create_gym(gym).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /gyms/:id
pub async fn get_gym_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Gym>> {
    found(state.gyms.get_gym(&id).await?, "gym", &id)
}

/// Handler for PUT /gyms/:id
pub async fn update_gym_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut gym): Json<Gym>,
) -> Result<Json<Gym>> {
    gym.id = id;
    Ok(Json(state.gyms.update_gym(gym).await?))
}

/// Handler for DELETE /gyms/:id
pub async fn delete_gym_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.gyms.delete_gym(&id).await?;
    Ok(Json(MessageResponse::new(format!("Gym '{}' deleted", id))))
}

/// Handler for PUT /gyms/:id/verification
pub async fn update_verification_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<VerificationRequest>,
) -> Result<Json<Gym>> {
    Ok(Json(
        state.gyms.update_verification_status(&id, req.status).await?,
    ))
}

/// Handler for GET /gyms/:id/events
pub async fn gym_events_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Event>>> {
    Ok(Json(state.events.get_events_for_gym(&id).await?))
}

/// Handler for GET /events/:id
pub async fn get_event_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>> {
    found(state.events.get_event(&id).await?, "event", &id)
}

/// Handler for GET /users/:id
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    found(state.users.get_user(&id).await?, "user", &id)
}
