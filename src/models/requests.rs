//! Request DTOs for the HTTP API

use serde::Deserialize;

use crate::models::VerificationStatus;

/// Query string for `GET /gyms`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GymQuery {
    /// Free-text search; all gyms when absent or blank
    #[serde(default)]
    pub q: Option<String>,
}

impl GymQuery {
    /// The search text, if it holds anything besides whitespace.
    pub fn search_text(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.trim().is_empty())
    }
}

/// Body for `PUT /gyms/:id/verification`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationRequest {
    pub status: VerificationStatus,
}
