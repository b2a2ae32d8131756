//! Conversation Data Structure
//!
//! Represents a direct-message conversation between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::Message;
use super::user::UserProfile;
use crate::shared::error::SharedError;

/// A DM conversation with its participants and latest message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub participants: Vec<UserProfile>,
    pub last_message: Option<Message>,
    pub last_message_at: Option<DateTime<Utc>>,
    /// Read receipts are not tracked yet, so this is always 0
    #[serde(default)]
    pub unread_count: u32,
}

impl Conversation {
    /// Time of the last message, or creation time for an empty conversation
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_message_at.unwrap_or(self.created_at)
    }

    /// Check if user is a participant
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.iter().any(|p| p.id == user_id)
    }

    /// Get the other participant
    pub fn other_participant(&self, current_user_id: Uuid) -> Option<&UserProfile> {
        self.participants.iter().find(|p| p.id != current_user_id)
    }
}

/// Most recently active first
pub fn sort_by_activity(conversations: &mut [Conversation]) {
    conversations.sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));
}

/// Request to open a conversation with a friend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationCreate {
    pub participant_username: String,
}

impl ConversationCreate {
    pub fn normalized_username(&self) -> Result<String, SharedError> {
        let trimmed = self.participant_username.trim();
        if trimmed.is_empty() {
            return Err(SharedError::validation(
                "participant_username",
                "Username cannot be empty",
            ));
        }
        Ok(trimmed.to_lowercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<Conversation>,
    pub total: usize,
}

impl From<Vec<Conversation>> for ConversationListResponse {
    fn from(mut conversations: Vec<Conversation>) -> Self {
        sort_by_activity(&mut conversations);
        Self {
            total: conversations.len(),
            conversations,
        }
    }
}
