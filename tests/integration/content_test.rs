//! End-to-end checks of the message document pipeline

use aigm::shared::content::{self, ValidationError};
use aigm::shared::messaging::{MessageCreate, MessageEdit};
use aigm::shared::SharedError;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::*;
use crate::{assert_contains, assert_err, assert_ok, assert_rejected, sanitized};

#[test]
fn test_length_boundaries() {
    let at_limit = plain(&"a".repeat(2000));
    let valid = assert_ok!(content::validate(&at_limit));
    assert_eq!(valid.text_length(), 2000);

    assert_rejected!(plain(&"a".repeat(2001)), "too long");
    assert_rejected!(plain(""), "empty");
}

#[test]
fn test_length_counts_across_leaves() {
    let document = doc(vec![
        heading(vec![text(&"h".repeat(1000))]),
        paragraph(vec![text(&"p".repeat(1000)), marked("!", &["bold"])]),
    ]);
    assert_rejected!(document, "too long");
}

#[test]
fn test_shape_errors() {
    assert_rejected!(json!({ "type": "paragraph", "content": [] }), "must be a document");
    assert_rejected!(json!("doc"), "must be a document");
    assert_rejected!(json!({ "type": "doc" }), "content must be an array");
    assert_rejected!(json!({ "type": "doc", "content": {} }), "content must be an array");
}

#[test]
fn test_unknown_node_text_does_not_count() {
    let document = doc(vec![json!({ "type": "mention", "text": "@alex" })]);
    assert_rejected!(document, "empty");
}

#[test]
fn test_script_payload_is_neutralized() {
    let out = sanitized!(plain("<script>alert(1)</script>"));
    assert_eq!(first_text(&out), "alert(1)");
}

#[test]
fn test_benign_document_round_trips() {
    let document = doc(vec![
        heading(vec![text("Release notes")]),
        paragraph(vec![
            text("Now with "),
            marked("bold", &["bold"]),
            text(" and "),
            marked("code", &["code", "italic"]),
        ]),
    ]);
    assert_eq!(sanitized!(document.clone()), document);
}

#[test]
fn test_marks_filtered_to_allow_list() {
    let out = sanitized!(doc(vec![paragraph(vec![marked("x", &["bold", "underline"])])]));
    assert_eq!(out["content"][0]["content"][0]["marks"], json!([{ "type": "bold" }]));
}

#[test]
fn test_unknown_node_loses_type() {
    let document = doc(vec![
        paragraph(vec![text("ok")]),
        json!({ "type": "unknown_tag", "text": "x" }),
    ]);
    assert_eq!(sanitized!(document)["content"][1], json!({ "text": "x" }));
}

#[test]
fn test_message_create_checks_destination_before_content() {
    let request = MessageCreate {
        content: plain(""),
        dm_conversation_id: None,
        room_id: None,
    };
    let err = request.validate().unwrap_err();
    assert_contains!(err.to_string(), "Either dm_conversation_id or room_id");

    let request = MessageCreate::direct(Uuid::new_v4(), plain(""));
    assert_err!(request.validate(), SharedError::Content(ValidationError::Empty));
}

#[test]
fn test_message_edit_is_validated() {
    let edit = MessageEdit {
        content: json!({ "type": "doc", "content": "nope" }),
    };
    assert_matches!(
        edit.validate(),
        Err(SharedError::Content(ValidationError::ContentNotArray))
    );
}
