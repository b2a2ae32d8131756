//! Conversations Module
//!
//! Direct-message conversations between two friends.

pub mod db;
pub mod service;

pub use service::{create_or_find_conversation, delete_conversation, get_conversation, list_conversations};
