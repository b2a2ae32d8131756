//! Friendship Data Structures
//!
//! A friendship row links a requester and an addressee. It starts out
//! pending, becomes accepted when the addressee accepts, and either side can
//! block it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserProfile;
use crate::shared::error::SharedError;

/// Longest accepted username in a friend request
pub const MAX_USERNAME_CHARS: usize = 50;

/// Status of a friendship
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    #[default]
    Pending,
    Accepted,
    Blocked,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "pending",
            FriendshipStatus::Accepted => "accepted",
            FriendshipStatus::Blocked => "blocked",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(FriendshipStatus::Pending),
            "accepted" => Some(FriendshipStatus::Accepted),
            "blocked" => Some(FriendshipStatus::Blocked),
            _ => None,
        }
    }

    /// Why a new request cannot be sent over an existing row in this status
    pub fn conflict_message(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "Friend request already pending",
            FriendshipStatus::Accepted => "You are already friends with this user",
            FriendshipStatus::Blocked => "Cannot send friend request to this user",
        }
    }
}

/// A friendship between two users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Friendship {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub addressee_id: Uuid,
    #[serde(default)]
    pub status: FriendshipStatus,
    /// User who last changed the status
    pub action_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub requester: Option<UserProfile>,
    #[serde(default)]
    pub addressee: Option<UserProfile>,
}

impl Friendship {
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.requester_id == user_id || self.addressee_id == user_id
    }

    /// The participant that is not `user_id`
    pub fn other_user(&self, user_id: Uuid) -> Option<Uuid> {
        if self.requester_id == user_id {
            Some(self.addressee_id)
        } else if self.addressee_id == user_id {
            Some(self.requester_id)
        } else {
            None
        }
    }

    /// Profile of the participant that is not `user_id`, when loaded
    pub fn other_profile(&self, user_id: Uuid) -> Option<&UserProfile> {
        if self.requester_id == user_id {
            self.addressee.as_ref()
        } else {
            self.requester.as_ref()
        }
    }
}

/// Request to befriend a user by username
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestCreate {
    pub addressee_username: String,
}

impl FriendRequestCreate {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            addressee_username: username.into(),
        }
    }

    /// Trimmed, lower-cased username
    pub fn normalized_username(&self) -> Result<String, SharedError> {
        let trimmed = self.addressee_username.trim();
        if trimmed.is_empty() {
            return Err(SharedError::validation(
                "addressee_username",
                "Username cannot be empty",
            ));
        }
        if trimmed.chars().count() > MAX_USERNAME_CHARS {
            return Err(SharedError::validation(
                "addressee_username",
                "Username cannot exceed 50 characters",
            ));
        }
        Ok(trimmed.to_lowercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendshipListResponse {
    pub friendships: Vec<Friendship>,
    pub total: usize,
}

impl From<Vec<Friendship>> for FriendshipListResponse {
    fn from(friendships: Vec<Friendship>) -> Self {
        Self {
            total: friendships.len(),
            friendships,
        }
    }
}
