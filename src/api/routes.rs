//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_caches_handler, clear_caches_handler, create_gym_handler, delete_gym_handler,
    get_event_handler, get_gym_handler, get_user_handler, gym_events_handler, health_handler,
    list_gyms_handler, stats_handler, update_gym_handler, update_verification_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check
/// - `GET /stats` - Per-cache statistics
/// - `POST /cache/clear` - Empty every cache
/// - `POST /cache/cleanup` - Sweep expired entries now
/// - `GET /gyms[?q=]`, `POST /gyms` - List/search, create
/// - `GET|PUT|DELETE /gyms/:id` - Read, update, delete one gym
/// - `PUT /gyms/:id/verification` - Change verification status
/// - `GET /gyms/:id/events` - Events hosted by a gym
/// - `GET /events/:id`, `GET /users/:id` - Single reads
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/cache/clear", post(clear_caches_handler))
        .route("/cache/cleanup", post(cleanup_caches_handler))
        .route("/gyms", get(list_gyms_handler).post(create_gym_handler))
        .route(
            "/gyms/:id",
            get(get_gym_handler)
                .put(update_gym_handler)
                .delete(delete_gym_handler),
        )
        .route("/gyms/:id/verification", put(update_verification_handler))
        .route("/gyms/:id/events", get(gym_events_handler))
        .route("/events/:id", get(get_event_handler))
        .route("/users/:id", get(get_user_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
