//! Document validation errors.
//!
//! The messages are part of the client contract: callers match on
//! substrings such as "must be a document", "empty" and "too long".

use thiserror::Error;

use super::policy::MAX_MESSAGE_CHARS;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The root is not an object with `type == "doc"`
    #[error("must be a document with type doc")]
    NotADocument,

    /// The root has no `content` array
    #[error("content must be an array")]
    ContentNotArray,

    /// No text was found anywhere in the tree
    #[error("message cannot be empty")]
    Empty,

    /// More than [`MAX_MESSAGE_CHARS`] characters of text
    #[error("message too long, max {max} characters")]
    TooLong {
        /// Counted characters
        length: usize,
        /// Limit that was exceeded
        max: usize,
    },
}

impl ValidationError {
    pub(crate) fn too_long(length: usize) -> Self {
        Self::TooLong {
            length,
            max: MAX_MESSAGE_CHARS,
        }
    }
}
