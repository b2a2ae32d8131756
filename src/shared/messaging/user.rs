//! User Profile Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::search::Candidate;

fn default_status() -> String {
    "online".to_string()
}

fn default_status_color() -> String {
    "#22c55e".to_string()
}

/// Public profile of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub custom_url: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub status_text: Option<String>,
    #[serde(default = "default_status_color")]
    pub status_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Display name if set, otherwise the username
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// One row of a user search page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSearchResult {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub status: String,
}

impl Candidate for UserSearchResult {
    fn username(&self) -> &str {
        &self.username
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

impl From<UserProfile> for UserSearchResult {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            display_name: profile.display_name,
            avatar_url: profile.avatar_url,
            status: profile.status,
        }
    }
}

/// A ranked page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchResponse {
    pub users: Vec<UserSearchResult>,
    /// Matches across all pages
    pub total: i64,
    pub limit: u32,
    pub offset: u32,
}
