//! Messaging Module
//!
//! Rich-text messages in DM conversations and rooms.

pub mod db;
pub mod service;

pub use service::*;
