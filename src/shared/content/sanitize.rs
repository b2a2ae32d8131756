//! Document sanitization.
//!
//! Output is built from an allow-list: only `type`, `text`, `marks` and
//! `content` can ever appear, and only in the forms below.

use serde::{Deserialize, Serialize};

use super::node::{MarkRef, Node};
use super::policy::{strip_denylisted, MarkType, NodeType};
use super::validate::ValidDoc;

/// A mark as persisted: only its type survives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
}

/// A sanitized node, the only form that is stored or displayed
///
/// `kind` is `None` for nodes whose input type was not allow-listed. Such
/// typeless nodes keep their text and children; renderers treat them as
/// plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Never `Some` and empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<SanitizedNode>>,
}

/// A sanitized document; serializes to the same JSON shape it was given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SanitizedDoc(pub SanitizedNode);

impl SanitizedDoc {
    pub fn root(&self) -> &SanitizedNode {
        &self.0
    }

    pub fn to_value(&self) -> serde_json::Value {
        // A tree of strings, enums and vectors always serializes
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Sanitize a validated document
pub fn sanitize(doc: &ValidDoc) -> SanitizedDoc {
    SanitizedDoc(sanitize_node(doc.root()))
}

/// Sanitize a single node and its subtree
pub fn sanitize_node(node: &Node) -> SanitizedNode {
    SanitizedNode {
        kind: node.kind.allowed(),
        text: node.text.as_deref().map(strip_denylisted),
        marks: node.marks.as_deref().and_then(sanitize_marks),
        content: node
            .content
            .as_ref()
            .map(|children| children.iter().map(sanitize_node).collect()),
    }
}

fn sanitize_marks(marks: &[MarkRef]) -> Option<Vec<Mark>> {
    let kept: Vec<Mark> = marks
        .iter()
        .filter_map(|mark| mark.kind.allowed())
        .map(|kind| Mark { kind })
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept)
    }
}
