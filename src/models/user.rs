//! User Model

use serde::{Deserialize, Serialize};

// == User ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub favorite_gyms: Vec<String>,
    #[serde(default)]
    pub favorite_events: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: String::new(),
            favorite_gyms: Vec::new(),
            favorite_events: Vec::new(),
        }
    }
}
