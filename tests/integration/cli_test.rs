//! The `aigm-content` binary

use std::io::Write;
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;
use crate::{assert_contains, assert_ok};

fn content_check() -> Command {
    Command::new(env!("CARGO_BIN_EXE_aigm-content"))
}

fn write_temp(value: &Value) -> tempfile::NamedTempFile {
    let mut file = assert_ok!(tempfile::NamedTempFile::new());
    assert_ok!(write!(file, "{}", value));
    file
}

#[test]
fn test_prints_sanitized_document() {
    let file = write_temp(&plain("<iframe>hello</iframe>"));
    let output = assert_ok!(content_check().arg(file.path()).output());

    assert!(output.status.success());
    let printed: Value = assert_ok!(serde_json::from_slice(&output.stdout));
    assert_eq!(first_text(&printed), "hello");
}

#[test]
fn test_rejected_document_exits_with_status_2() {
    let file = write_temp(&plain(&"a".repeat(2001)));
    let output = assert_ok!(content_check().arg(file.path()).output());

    assert_eq!(output.status.code(), Some(2));
    assert_contains!(String::from_utf8_lossy(&output.stderr), "too long");
}

#[test]
fn test_reads_stdin_when_no_file_given() {
    let mut child = assert_ok!(content_check()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn());
    {
        let stdin = child.stdin.as_mut().unwrap();
        assert_ok!(write!(stdin, "{}", plain("from stdin")));
    }
    let output = assert_ok!(child.wait_with_output());

    assert!(output.status.success());
    let printed: Value = assert_ok!(serde_json::from_slice(&output.stdout));
    assert_eq!(first_text(&printed), "from stdin");
}

#[test]
fn test_rank_mode_keeps_extra_fields() {
    let file = write_temp(&json!([
        { "username": "alexandra", "id": 1 },
        { "username": "alex", "id": 2 },
    ]));
    let output = assert_ok!(content_check().args(["--rank", "alex"]).arg(file.path()).output());

    assert!(output.status.success());
    let printed: Value = assert_ok!(serde_json::from_slice(&output.stdout));
    assert_eq!(
        printed,
        json!([
            { "username": "alex", "id": 2 },
            { "username": "alexandra", "id": 1 },
        ])
    );
}

#[test]
fn test_unknown_flag_is_a_usage_error() {
    let output = assert_ok!(content_check().args(["--rnak", "alex"]).output());

    assert_eq!(output.status.code(), Some(1));
    assert_contains!(String::from_utf8_lossy(&output.stderr), "--rnak");
}

#[test]
fn test_rank_without_query_is_a_usage_error() {
    let output = assert_ok!(content_check().arg("--rank").output());

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_lists_rank_option() {
    let output = assert_ok!(content_check().arg("--help").output());

    assert!(output.status.success());
    assert_contains!(String::from_utf8_lossy(&output.stdout), "--rank");
}

#[test]
fn test_invalid_configuration_is_reported() {
    let file = write_temp(&plain("hello"));
    let output = assert_ok!(content_check()
        .env("DATABASE_URL", "mysql://localhost/db")
        .arg(file.path())
        .output());

    assert_eq!(output.status.code(), Some(1));
    assert_contains!(String::from_utf8_lossy(&output.stderr), "invalid configuration");
}
