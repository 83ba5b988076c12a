//! Purpose: Lock the observable contract of document member access and rendering.
//! Exports: Integration tests only (no runtime exports).
//! Role: Catch drift in wrapping, aliasing, ordering, and compatibility-mode output.
//! Invariants: Expected render strings are byte-exact.
//! Invariants: Fixtures are built through the public `api` surface only.

use dyndoc::api::{DynamicDocument, Member, Node, ObjectMap, from_str, serialize};
use serde_json::json;

fn document(value: serde_json::Value) -> DynamicDocument {
    DynamicDocument::from_node(&Node::from(value)).expect("object fixture")
}

#[test]
fn absent_key_reads_as_null_success() {
    let doc = document(json!({"a": 1}));
    let member = doc.get("nope");
    assert!(member.is_null());
    assert_eq!(member, Member::Null);
}

#[test]
fn nested_wrapper_writes_through_to_parent_map() {
    let backing: ObjectMap = from_str(r#"{"child":{"x":1}}"#)
        .expect("parse")
        .as_object()
        .cloned()
        .expect("object");
    let doc = DynamicDocument::new(backing.clone());

    let child = doc.get("child");
    let child = child.as_document().expect("document");
    child.set("y", "added");

    let Some(Node::Object(stored)) = backing.get("child") else {
        panic!("child should still be a raw object");
    };
    assert_eq!(stored.get("y"), Some(Node::from("added")));
    assert_eq!(stored.keys(), ["x", "y"]);
}

#[test]
fn flat_scalars_render_exactly() {
    let doc = document(json!({"a": "x", "b": 1, "c": true, "d": null}));
    assert_eq!(serialize(&doc), r#"{"a":"x","b":1,"c":true,"d":""}"#);
}

#[test]
fn nested_object_renders_exactly() {
    let doc = document(json!({"outer": {"inner": "v"}}));
    assert_eq!(serialize(&doc), r#"{"outer":{"inner":"v"}}"#);
}

#[test]
fn list_of_objects_reads_as_ordered_documents() {
    let doc = document(json!({"items": [{"n": "x"}, {"n": "y"}]}));
    let member = doc.get("items");
    let items = member.as_sequence().expect("sequence");
    let names: Vec<_> = items
        .iter()
        .map(|item| {
            item.as_document()
                .expect("document element")
                .get("n")
                .as_str()
                .map(str::to_string)
        })
        .collect();
    assert_eq!(names, [Some("x".to_string()), Some("y".to_string())]);
}

#[test]
fn empty_list_is_passed_through() {
    let doc = document(json!({"items": []}));
    let member = doc.get("items");
    assert!(member.as_document().is_none());
    assert!(member.as_sequence().is_none());
    assert_eq!(member, Member::Value(Node::List(Vec::new())));
}

#[test]
fn iteration_follows_insertion_order() {
    let doc = DynamicDocument::new(ObjectMap::new());
    doc.set("z", 1_i64);
    doc.set("a", 2_i64);
    doc.set("m", 3_i64);
    let keys: Vec<_> = doc.entries().map(|(key, _)| key).collect();
    assert_eq!(keys, ["z", "a", "m"]);
    assert_eq!(serialize(&doc), r#"{"z":1,"a":2,"m":3}"#);
}

#[test]
fn serialize_is_idempotent() {
    let doc = document(json!({
        "id": 7,
        "tags": ["a", "b"],
        "owner": {"name": "n", "roles": [{"r": 1}]}
    }));
    let first = serialize(&doc);
    let second = serialize(&doc);
    assert_eq!(first, second);
    assert_eq!(
        first,
        r#"{"id":7,"tags":["a","b"],"owner":{"name":"n","roles":[{"r":1}]}}"#
    );
}

#[test]
fn overwrite_keeps_original_position() {
    let doc = document(json!({"a": 1, "b": 2, "c": 3}));
    doc.set("b", Node::from(json!({"now": "object"})));
    assert_eq!(serialize(&doc), r#"{"a":1,"b":{"now":"object"},"c":3}"#);
    assert!(doc.get("b").as_document().is_some());
}
