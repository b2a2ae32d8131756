//! Property-based tests for document validation and sanitization

use aigm::shared::content::{self, MAX_MESSAGE_CHARS, SCRIPT_DENYLIST};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Text that cannot contain a denylisted fragment
fn benign_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?]{1,40}"
}

fn leaf() -> impl Strategy<Value = Value> {
    (
        benign_text(),
        proptest::sample::subsequence(vec!["bold", "italic", "code"], 0..=3),
    )
        .prop_map(|(text, marks)| {
            if marks.is_empty() {
                json!({ "type": "text", "text": text })
            } else {
                let marks: Vec<Value> = marks.into_iter().map(|m| json!({ "type": m })).collect();
                json!({ "type": "text", "text": text, "marks": marks })
            }
        })
}

fn block() -> impl Strategy<Value = Value> {
    (
        prop_oneof![Just("paragraph"), Just("heading")],
        prop::collection::vec(leaf(), 1..5),
    )
        .prop_map(|(kind, children)| json!({ "type": kind, "content": children }))
}

fn benign_doc() -> impl Strategy<Value = Value> {
    prop::collection::vec(block(), 1..5).prop_map(|blocks| json!({ "type": "doc", "content": blocks }))
}

proptest! {
    #[test]
    fn test_benign_documents_are_a_fixed_point(doc in benign_doc()) {
        let clean = content::clean(&doc).unwrap();
        prop_assert_eq!(clean.to_value(), doc);
    }

    #[test]
    fn test_sanitize_is_idempotent(doc in benign_doc(), injected in "(<script>|</script>|javascript:|x){0,6}") {
        let mut doc = doc;
        doc["content"][0]["content"][0]["text"] = json!(injected + "tail");

        let once = content::clean(&doc).unwrap().to_value();
        let twice = content::clean(&once).unwrap().to_value();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_sanitized_text_has_no_denylisted_fragment(doc in benign_doc(), prefix in "(<iframe>|</iframe>|<script>|javascript:){1,4}") {
        let mut doc = doc;
        doc["content"][0]["content"][0]["text"] = json!(prefix + "payload");

        let clean = content::clean(&doc).unwrap().to_value();
        let text = clean["content"][0]["content"][0]["text"].as_str().unwrap().to_string();
        for fragment in SCRIPT_DENYLIST {
            prop_assert!(!text.contains(fragment));
        }
        prop_assert!(text.ends_with("payload"));
    }

    #[test]
    fn test_length_limit_matches_char_count(len in 1usize..2100, ch in prop_oneof![Just('a'), Just('é'), Just('日')]) {
        let doc = json!({
            "type": "doc",
            "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": ch.to_string().repeat(len) }] }]
        });
        prop_assert_eq!(content::validate(&doc).is_ok(), len <= MAX_MESSAGE_CHARS);
    }
}
