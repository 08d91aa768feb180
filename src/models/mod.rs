//! Domain models and HTTP DTOs
//!
//! Gym, event and user records are the value types held by the caches;
//! `requests` and `responses` define the HTTP bodies.

pub mod event;
pub mod gym;
pub mod requests;
pub mod responses;
pub mod user;

pub use event::Event;
pub use gym::{Gym, VerificationStatus};
pub use requests::{GymQuery, VerificationRequest};
pub use responses::{
    CacheStatsView, CleanupResponse, ErrorResponse, HealthResponse, MessageResponse, StatsResponse,
};
pub use user::User;
