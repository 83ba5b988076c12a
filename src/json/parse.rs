//! Purpose: Decode JSON text into `Node` trees and document views.
//! Exports: `from_str`, `document_from_str`, `ParseFailureCategory`, `categorize_error`,
//! `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage and failure classification.
//! Invariants: Object key order follows the input text (serde_json `preserve_order`).
//! Invariants: Hints carry category labels and caller context, never payload text.
use serde_json::Value;
use serde_json::error::Category;

use crate::core::document::DynamicDocument;
use crate::core::error::{Error, ErrorKind};
use crate::core::node::Node;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub fn from_str(input: &str) -> Result<Node, serde_json::Error> {
    serde_json::from_str::<Value>(input).map(Node::from)
}

/// Parses `input` and wraps its top-level object. Any other top-level value is a usage error.
pub fn document_from_str(input: &str) -> Result<DynamicDocument, Error> {
    let node = from_str(input).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message(format!(
                "invalid JSON at line {}, column {}",
                err.line(),
                err.column()
            ))
            .with_hint(hint_for_error(&err, "document"))
            .with_source(err)
    })?;
    DynamicDocument::from_node(&node).ok_or_else(|| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("top-level value is {}, expected object", node.kind()))
            .with_hint("Wrap the input in an object, e.g. {\"value\": ...}.")
    })
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; context: {context}",
        categorize_error(err).label()
    )
}
