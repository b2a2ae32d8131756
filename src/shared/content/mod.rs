//! Rich-Text Message Content
//!
//! Messages carry a structured-editor JSON document:
//!
//! ```json
//! { "type": "doc", "content": [
//!     { "type": "paragraph", "content": [
//!         { "type": "text", "text": "hi", "marks": [{ "type": "bold" }] }
//!     ]}
//! ]}
//! ```
//!
//! Every document arriving from a client goes through [`validate`] and then
//! [`sanitize`]; only the resulting [`SanitizedDoc`] is persisted or shown.
//!
//! # Example
//!
//! ```rust
//! use aigm::shared::content::{sanitize, validate};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "type": "doc",
//!     "content": [{ "type": "paragraph", "content": [
//!         { "type": "text", "text": "<script>hi</script>" }
//!     ]}]
//! });
//! let clean = sanitize(&validate(&doc).unwrap());
//! assert_eq!(clean.to_value()["content"][0]["content"][0]["text"], "hi");
//! ```
//!
//! Both functions are pure and can be called from any thread.

pub mod error;
pub mod node;
pub mod policy;
pub mod sanitize;
pub mod validate;

pub use error::ValidationError;
pub use node::{MarkRef, Node, NodeRole, Tag};
pub use policy::{MarkType, NodeType, MAX_MESSAGE_CHARS, SCRIPT_DENYLIST};
pub use sanitize::{sanitize, sanitize_node, Mark, SanitizedDoc, SanitizedNode};
pub use validate::{validate, ValidDoc};

/// Validate and sanitize in one step, as the message create/edit path does
pub fn clean(doc: &serde_json::Value) -> Result<SanitizedDoc, ValidationError> {
    validate(doc).map(|valid| sanitize(&valid))
}
