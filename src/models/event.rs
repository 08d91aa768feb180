//! Event Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Event ==
/// A gym-hosted event (comp, clinic, meetup).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    pub gym_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Event {
    /// Creates an unsaved event (no id yet).
    pub fn new(
        gym_id: impl Into<String>,
        title: impl Into<String>,
        starts_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            gym_id: gym_id.into(),
            title: title.into(),
            description: String::new(),
            starts_at,
            image_url: None,
        }
    }
}
