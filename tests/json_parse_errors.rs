//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by parse diagnostics.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Invariants: Tests avoid payload leakage; assertions target category/hint text only.

use dyndoc::api::ErrorKind;
use dyndoc::json::parse::{self, ParseFailureCategory};
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_eof_errors() {
    let syntax_err = parse::from_str(r#"{"a":}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let eof_err = parse::from_str(r#"{"a":1"#).unwrap_err();
    assert_eq!(parse::categorize_error(&eof_err), ParseFailureCategory::Eof);
}

#[test]
fn category_mapping_handles_data_errors() {
    let data_err = serde_json::from_str::<u8>("300").unwrap_err();
    assert_eq!(
        parse::categorize_error(&data_err),
        ParseFailureCategory::Data
    );
}

#[test]
fn hint_contains_category_and_context() {
    let err = serde_json::from_str::<Value>("[1,").unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: eof"));
    assert!(hint.contains("context: test.context"));
}

#[test]
fn document_errors_do_not_echo_payload() {
    let err = parse::document_from_str(r#"{"secret": tru}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    let message = err.message().expect("message");
    assert!(message.starts_with("invalid JSON at line 1"));
    assert!(!message.contains("secret"));
    assert!(!err.hint().unwrap_or_default().contains("secret"));
}
