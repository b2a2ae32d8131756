//! Shared Module
//!
//! Platform-agnostic types and pure logic used by the backend services and
//! by any client that wants to pre-check input before sending it.
//!
//! # Overview
//!
//! - [`content`] validates and sanitizes rich-text message documents
//! - [`search`] parses user search queries and ranks result pages
//! - [`messaging`] holds the request/response data structures
//! - [`config`] and [`error`] carry the ambient configuration and errors
//!
//! Nothing in here performs I/O.

/// Rich-text document validation and sanitization
pub mod content;

/// User search query parsing and ranking
pub mod search;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Messaging data structures
pub mod messaging;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
