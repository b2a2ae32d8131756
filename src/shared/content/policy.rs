//! Content Policy
//!
//! The closed allow-lists for node and mark types, the script denylist and
//! the message length limit. Everything the validator and sanitizer decide
//! is driven from here.

use serde::{Deserialize, Serialize};

/// Maximum number of characters (Unicode scalar values) in a message
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Literal substrings removed from text, applied in this order.
///
/// This is a best-effort denylist and NOT an HTML sanitizer: matching is
/// case-sensitive and literal, so `<SCRIPT>`, split tags, entity-encoded
/// payloads and event-handler attributes such as `onerror=` pass through.
pub const SCRIPT_DENYLIST: [&str; 5] = [
    "<script>",
    "</script>",
    "<iframe>",
    "</iframe>",
    "javascript:",
];

/// Node types a document may carry after sanitization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Doc,
    Paragraph,
    Text,
    Heading,
    Bold,
    Italic,
    Code,
}

impl NodeType {
    /// Every allowed node type
    pub const ALL: [NodeType; 7] = [
        NodeType::Doc,
        NodeType::Paragraph,
        NodeType::Text,
        NodeType::Heading,
        NodeType::Bold,
        NodeType::Italic,
        NodeType::Code,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Doc => "doc",
            NodeType::Paragraph => "paragraph",
            NodeType::Text => "text",
            NodeType::Heading => "heading",
            NodeType::Bold => "bold",
            NodeType::Italic => "italic",
            NodeType::Code => "code",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Formatting marks a text node may carry after sanitization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkType {
    Bold,
    Italic,
    Code,
}

impl MarkType {
    /// Every allowed mark type
    pub const ALL: [MarkType; 3] = [MarkType::Bold, MarkType::Italic, MarkType::Code];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkType::Bold => "bold",
            MarkType::Italic => "italic",
            MarkType::Code => "code",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Removes every [`SCRIPT_DENYLIST`] entry from `text`, one pattern at a time.
///
/// Patterns are applied sequentially over the running result, so removing an
/// earlier pattern can assemble a later one (which is then removed too) but
/// never an earlier one.
pub fn strip_denylisted(text: &str) -> String {
    SCRIPT_DENYLIST
        .iter()
        .fold(text.to_string(), |acc, pattern| acc.replace(pattern, ""))
}
