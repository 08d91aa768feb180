//! Gym Model
//!
//! A climbing gym record as stored in the document database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Verification Status ==
/// Review state of a gym listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

// == Gym ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gym {
    /// Server-assigned id; empty until the gym is created
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    /// Staff user ids allowed to manage the gym and its events
    #[serde(default)]
    pub staff: Vec<String>,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Gym {
    /// Creates an unsaved gym (no id yet).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            address: String::new(),
            staff: Vec::new(),
            verification_status: VerificationStatus::Pending,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive match on name, description and address.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.name, &self.description, &self.address]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}
