//! Purpose: Render a document view as single-line JSON-like text.
//! Exports: `RenderOptions`, `serialize`, `serialize_with`.
//! Role: Pure, recursive renderer that mirrors how member access unwraps the tree.
//! Invariants: Output follows insertion order and is byte-identical across repeated calls.
//! Invariants: Default options interpolate keys and strings raw; null values render as "".
//! Notes: Raw interpolation means quotes, backslashes, and control characters in keys or
//! Notes: strings yield invalid JSON. Set `escape_strings` when the consumer needs JSON.
use crate::core::document::DynamicDocument;
use crate::core::node::{Node, ObjectMap};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RenderOptions {
    pub escape_strings: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escaped() -> Self {
        Self {
            escape_strings: true,
        }
    }
}

pub fn serialize(document: &DynamicDocument) -> String {
    serialize_with(document, &RenderOptions::default())
}

pub fn serialize_with(document: &DynamicDocument, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_object(&document.backing(), options, &mut out);
    out
}

fn write_object(map: &ObjectMap, options: &RenderOptions, out: &mut String) {
    out.push('{');
    for (idx, (key, value)) in map.borrow().iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        write_pair(key, value, options, out);
    }
    out.push('}');
}

fn write_pair(key: &str, value: &Node, options: &RenderOptions, out: &mut String) {
    push_quoted(key, options, out);
    out.push(':');
    match value {
        Node::Null => push_quoted("", options, out),
        Node::String(text) => push_quoted(text, options, out),
        Node::Object(map) => write_object(map, options, out),
        Node::List(items) => write_list(items, options, out),
        Node::Bool(_) | Node::Number(_) => push_natural(value, options, out),
    }
}

fn write_list(items: &[Node], options: &RenderOptions, out: &mut String) {
    out.push('[');
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        match item {
            Node::Object(map) => write_object(map, options, out),
            Node::String(text) => push_quoted(text, options, out),
            other => push_natural(other, options, out),
        }
    }
    out.push(']');
}

// Text form of a value that is not a map or string: list elements and scalar pairs.
fn push_natural(value: &Node, options: &RenderOptions, out: &mut String) {
    match value {
        Node::Null => out.push_str("null"),
        Node::Bool(true) => out.push_str("true"),
        Node::Bool(false) => out.push_str("false"),
        Node::Number(number) => out.push_str(&number.to_string()),
        Node::List(items) => write_list(items, options, out),
        Node::String(text) => push_quoted(text, options, out),
        Node::Object(map) => write_object(map, options, out),
    }
}

fn push_quoted(text: &str, options: &RenderOptions, out: &mut String) {
    if options.escape_strings {
        let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
        out.push_str(&encoded);
        return;
    }
    out.push('"');
    out.push_str(text);
    out.push('"');
}
