//! Shared Error Types
//!
//! Errors raised by the platform-agnostic layer: request parsing, content
//! validation and (de)serialization. The backend wraps these in its own
//! error type when answering a request.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A request field failed a shape or length check
//! - `Content` - A rich-text message document was rejected
//!
//! # Usage
//!
//! ```rust
//! use aigm::shared::error::SharedError;
//!
//! let error = SharedError::validation("q", "Search query must be at least 1 character");
//! assert!(error.to_string().contains("at least 1 character"));
//! ```
use thiserror::Error;

use crate::shared::content::ValidationError;

/// Shared error types that can occur in both frontend and backend
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Request field validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Message document rejected by the content validator
    #[error(transparent)]
    Content(#[from] ValidationError),
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message without the category prefix, suitable for a response body
    pub fn detail(&self) -> String {
        match self {
            Self::SerializationError { message } | Self::ValidationError { message, .. } => {
                message.clone()
            }
            Self::Content(err) => err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
