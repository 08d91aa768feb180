//! API Module
//!
//! HTTP handlers and routing over the cache-decorated repositories.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
