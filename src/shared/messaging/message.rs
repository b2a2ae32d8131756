//! Message Data Structures
//!
//! Requests for creating and editing rich-text messages, and the persisted
//! message as returned to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::content::{validate, SanitizedDoc, ValidDoc};
use crate::shared::error::SharedError;

/// Where a message is posted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// A direct-message conversation
    Direct(Uuid),
    /// A room belonging to a server
    Room(Uuid),
}

impl Destination {
    pub fn id(&self) -> Uuid {
        match self {
            Destination::Direct(id) | Destination::Room(id) => *id,
        }
    }

    /// Split into the `(dm_conversation_id, room_id)` column pair
    pub fn columns(&self) -> (Option<Uuid>, Option<Uuid>) {
        match self {
            Destination::Direct(id) => (Some(*id), None),
            Destination::Room(id) => (None, Some(*id)),
        }
    }
}

/// Request to post a new message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreate {
    /// Raw editor document, validated before anything else touches it
    pub content: Value,
    #[serde(default)]
    pub dm_conversation_id: Option<Uuid>,
    #[serde(default)]
    pub room_id: Option<Uuid>,
}

impl MessageCreate {
    pub fn direct(conversation_id: Uuid, content: Value) -> Self {
        Self {
            content,
            dm_conversation_id: Some(conversation_id),
            room_id: None,
        }
    }

    pub fn room(room_id: Uuid, content: Value) -> Self {
        Self {
            content,
            dm_conversation_id: None,
            room_id: Some(room_id),
        }
    }

    /// Exactly one of the two destination fields must be set
    pub fn destination(&self) -> Result<Destination, SharedError> {
        match (self.dm_conversation_id, self.room_id) {
            (Some(id), None) => Ok(Destination::Direct(id)),
            (None, Some(id)) => Ok(Destination::Room(id)),
            (None, None) => Err(SharedError::validation(
                "destination",
                "Either dm_conversation_id or room_id must be specified",
            )),
            (Some(_), Some(_)) => Err(SharedError::validation(
                "destination",
                "Cannot specify both dm_conversation_id and room_id",
            )),
        }
    }

    /// Check destination and content together
    pub fn validate(&self) -> Result<(Destination, ValidDoc), SharedError> {
        let destination = self.destination()?;
        let doc = validate(&self.content)?;
        Ok((destination, doc))
    }
}

/// Request to replace a message's content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEdit {
    pub content: Value,
}

impl MessageEdit {
    pub fn validate(&self) -> Result<ValidDoc, SharedError> {
        Ok(validate(&self.content)?)
    }
}

/// A persisted message; its content has always been sanitized
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub content: SanitizedDoc,
    pub author_id: Uuid,
    pub dm_conversation_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn destination(&self) -> Option<Destination> {
        match (self.dm_conversation_id, self.room_id) {
            (Some(id), _) => Some(Destination::Direct(id)),
            (None, Some(id)) => Some(Destination::Room(id)),
            (None, None) => None,
        }
    }

    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some_and(|updated| updated > self.created_at)
    }
}

/// Pagination for message history
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MessagePage {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl MessagePage {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Resolve to `(limit, offset)`, rejecting a limit outside `1..=max_limit`
    pub fn resolve(&self, default_limit: u32, max_limit: u32) -> Result<(u32, u32), SharedError> {
        let limit = self.limit.unwrap_or(default_limit);
        if limit < 1 || limit > max_limit {
            return Err(SharedError::validation(
                "limit",
                format!("limit must be between 1 and {}", max_limit),
            ));
        }
        Ok((limit, self.offset.unwrap_or(0)))
    }
}

/// One page of a conversation's or room's history, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<Message>,
    /// Number of messages in this page
    pub total: usize,
    /// The page came back full, so another may follow
    pub has_more: bool,
    /// Conversation or room the page belongs to
    pub conversation_id: Uuid,
}

impl MessageListResponse {
    pub fn from_page(messages: Vec<Message>, limit: u32, conversation_id: Uuid) -> Self {
        let total = messages.len();
        Self {
            has_more: total == limit as usize,
            total,
            messages,
            conversation_id,
        }
    }
}
