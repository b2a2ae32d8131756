//! Document Tree
//!
//! Typed representation of an untrusted rich-text document. Parsing from
//! JSON is total: anything the tree cannot represent (non-string `text`,
//! non-array `content`, non-object children, unknown fields) is dropped at
//! this boundary, so later passes only ever match on typed data.

use serde_json::{Map, Value};

use super::policy::{MarkType, NodeType};

/// A `type` tag as found in the input, resolved against a closed allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag<T> {
    /// The tag names a member of the allow-list
    Allowed(T),
    /// The tag is a string outside the allow-list
    Other(String),
    /// The `type` field is absent or not a string
    Missing,
}

impl<T: Copy> Tag<T> {
    /// The allow-listed value, if any
    pub fn allowed(&self) -> Option<T> {
        match self {
            Tag::Allowed(t) => Some(*t),
            Tag::Other(_) | Tag::Missing => None,
        }
    }

    fn resolve(value: Option<&Value>, lookup: fn(&str) -> Option<T>) -> Self {
        match value {
            Some(Value::String(s)) => match lookup(s) {
                Some(t) => Tag::Allowed(t),
                None => Tag::Other(s.clone()),
            },
            _ => Tag::Missing,
        }
    }
}

/// A formatting mark attached to a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkRef {
    pub kind: Tag<MarkType>,
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: Tag<NodeType>,
    /// Present only when the input carried a string
    pub text: Option<String>,
    /// Present only when the input carried an array
    pub marks: Option<Vec<MarkRef>>,
    /// Present only when the input carried an array
    pub content: Option<Vec<Node>>,
}

/// Coarse shape of a node, used by traversals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole<'a> {
    /// A `text` node; its text counts toward the message length
    TextLeaf(&'a str),
    /// Any other node with a child list
    Container(&'a [Node]),
    /// Contributes nothing to extracted text
    Inert,
}

impl Node {
    /// Parse one node; non-object values become an empty, typeless node
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::empty(),
        }
    }

    pub(crate) fn from_map(map: &Map<String, Value>) -> Self {
        let text = match map.get("text") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };

        let marks = match map.get("marks") {
            Some(Value::Array(items)) => Some(items.iter().filter_map(parse_mark).collect()),
            _ => None,
        };

        let content = match map.get("content") {
            Some(Value::Array(items)) => Some(items.iter().map(Self::from_value).collect()),
            _ => None,
        };

        Self {
            kind: Tag::resolve(map.get("type"), NodeType::from_str),
            text,
            marks,
            content,
        }
    }

    fn empty() -> Self {
        Self {
            kind: Tag::Missing,
            text: None,
            marks: None,
            content: None,
        }
    }

    /// Classify this node for text extraction.
    ///
    /// A `text` node counts its text (or nothing, when it has none) and is
    /// never descended into; every other node is descended into when it has
    /// a child list, whatever its type.
    pub fn role(&self) -> NodeRole<'_> {
        match (&self.kind, &self.content) {
            (Tag::Allowed(NodeType::Text), _) => NodeRole::TextLeaf(self.text.as_deref().unwrap_or("")),
            (_, Some(children)) => NodeRole::Container(children),
            (_, None) => NodeRole::Inert,
        }
    }

    /// Concatenated text of every `text` node, depth-first
    pub fn extract_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self.role() {
            NodeRole::TextLeaf(text) => out.push_str(text),
            NodeRole::Container(children) => {
                for child in children {
                    child.push_text(out);
                }
            }
            NodeRole::Inert => {}
        }
    }

    /// Length of [`Node::extract_text`] in Unicode scalar values
    pub fn text_length(&self) -> usize {
        match self.role() {
            NodeRole::TextLeaf(text) => text.chars().count(),
            NodeRole::Container(children) => children.iter().map(Node::text_length).sum(),
            NodeRole::Inert => 0,
        }
    }
}

// Mark entries that are not objects are skipped outright.
fn parse_mark(value: &Value) -> Option<MarkRef> {
    let map = value.as_object()?;
    Some(MarkRef {
        kind: Tag::resolve(map.get("type"), MarkType::from_str),
    })
}
