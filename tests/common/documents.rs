//! Rich-text document builders
//!
//! Small helpers for assembling editor documents in tests without spelling
//! out the full JSON every time.

use serde_json::{json, Value};

/// A text leaf
pub fn text(s: &str) -> Value {
    json!({ "type": "text", "text": s })
}

/// A text leaf carrying the given marks
pub fn marked(s: &str, marks: &[&str]) -> Value {
    let marks: Vec<Value> = marks.iter().map(|m| json!({ "type": m })).collect();
    json!({ "type": "text", "text": s, "marks": marks })
}

pub fn paragraph(children: Vec<Value>) -> Value {
    json!({ "type": "paragraph", "content": children })
}

pub fn heading(children: Vec<Value>) -> Value {
    json!({ "type": "heading", "content": children })
}

/// A root document with the given blocks
pub fn doc(blocks: Vec<Value>) -> Value {
    json!({ "type": "doc", "content": blocks })
}

/// A document holding a single paragraph of plain text
pub fn plain(s: &str) -> Value {
    doc(vec![paragraph(vec![text(s)])])
}

/// Text of the first leaf in the first paragraph of a sanitized document
pub fn first_text(value: &Value) -> &str {
    value["content"][0]["content"][0]["text"]
        .as_str()
        .unwrap_or_default()
}
