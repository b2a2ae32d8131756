//! Document validation: structure first, then extracted-text length.

use serde_json::Value;

use super::error::ValidationError;
use super::node::Node;
use super::policy::MAX_MESSAGE_CHARS;

/// A document that passed [`validate`]
///
/// The only way to obtain one is through validation, which is what lets
/// [`super::sanitize`] be total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDoc {
    root: Node,
    text_length: usize,
}

impl ValidDoc {
    /// The parsed root node (`type == "doc"`)
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Extracted text length in characters, always in `1..=MAX_MESSAGE_CHARS`
    pub fn text_length(&self) -> usize {
        self.text_length
    }

    /// Concatenated text of the document, depth-first
    pub fn plain_text(&self) -> String {
        self.root.extract_text()
    }
}

/// Validate an untrusted document.
///
/// Checks run in a fixed order and the first failure wins:
/// root is a `doc` object, root `content` is an array, extracted text is
/// non-empty, extracted text is at most [`MAX_MESSAGE_CHARS`] characters.
pub fn validate(doc: &Value) -> Result<ValidDoc, ValidationError> {
    let map = doc.as_object().ok_or(ValidationError::NotADocument)?;

    if map.get("type").and_then(Value::as_str) != Some("doc") {
        return Err(ValidationError::NotADocument);
    }

    if !matches!(map.get("content"), Some(Value::Array(_))) {
        return Err(ValidationError::ContentNotArray);
    }

    let root = Node::from_map(map);
    let text_length = root.text_length();

    if text_length == 0 {
        return Err(ValidationError::Empty);
    }
    if text_length > MAX_MESSAGE_CHARS {
        return Err(ValidationError::too_long(text_length));
    }

    Ok(ValidDoc { root, text_length })
}
