//! Purpose: Untyped parsed-document values and the shared, insertion-ordered object map.
//! Exports: `Node`, `ObjectMap`.
//! Role: Data model every document view, renderer, and parser conversion operates on.
//! Invariants: Cloning an `ObjectMap` (or a `Node::Object`) aliases storage, never copies it.
//! Invariants: Map iteration order is insertion order; overwriting a key keeps its position.
//! Notes: `Rc`/`RefCell` keep the model single-threaded; cycles are the caller's to avoid.
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value};

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Node>),
    Object(ObjectMap),
}

/// Shared handle to a string-keyed map of nodes.
///
/// Every clone of the handle points at the same storage, so a write through one
/// handle is visible through all of them.
#[derive(Clone, Default)]
pub struct ObjectMap(Rc<RefCell<IndexMap<String, Node>>>);

impl ObjectMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Returns a clone of the stored node. Nested maps in the result still alias this tree.
    pub fn get(&self, key: &str) -> Option<Node> {
        self.0.borrow().get(key).cloned()
    }

    /// Stores `value` under `key`, replacing in place when the key already exists.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    pub fn entry_at(&self, index: usize) -> Option<(String, Node)> {
        self.0
            .borrow()
            .get_index(index)
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    /// True when both handles share the same storage.
    pub fn ptr_eq(&self, other: &ObjectMap) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn borrow(&self) -> Ref<'_, IndexMap<String, Node>> {
        self.0.borrow()
    }
}

impl PartialEq for ObjectMap {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for ObjectMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ObjectMap
where
    K: Into<String>,
    V: Into<Node>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect::<IndexMap<_, _>>();
        Self(Rc::new(RefCell::new(map)))
    }
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::List(_) => "list",
            Node::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Node::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(value.into())
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Node::Number(value.into())
    }
}

impl From<f64> for Node {
    // Same rule as serde_json: NaN and infinities have no JSON form.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Node::Null, Node::Number)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::List(value)
    }
}

impl From<ObjectMap> for Node {
    fn from(value: ObjectMap) -> Self {
        Node::Object(value)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(value) => Node::Bool(value),
            Value::Number(number) => Node::Number(number),
            Value::String(text) => Node::String(text),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Object(map.into_iter().collect()),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(value) => Value::Bool(*value),
            Node::Number(number) => Value::Number(number.clone()),
            Node::String(text) => Value::String(text.clone()),
            Node::List(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Object(map) => Value::Object(
                map.borrow()
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(value) => serializer.serialize_bool(*value),
            Node::Number(number) => number.serialize(serializer),
            Node::String(text) => serializer.serialize_str(text),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Object(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for ObjectMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let inner = self.borrow();
        let mut out = serializer.serialize_map(Some(inner.len()))?;
        for (key, value) in inner.iter() {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{Node, ObjectMap};

    #[test]
    fn cloned_handles_alias_storage() {
        let map = ObjectMap::new();
        let alias = map.clone();
        alias.insert("k", "v");
        assert_eq!(map.get("k"), Some(Node::from("v")));
        assert!(map.ptr_eq(&alias));
        assert!(!map.ptr_eq(&ObjectMap::new()));
    }

    #[test]
    fn overwrite_keeps_position_and_new_keys_append() {
        let map: ObjectMap = [("a", 1_i64), ("b", 2), ("c", 3)].into_iter().collect();
        let previous = map.insert("b", "two");
        assert_eq!(previous, Some(Node::from(2_i64)));
        map.insert("d", true);
        assert_eq!(map.keys(), ["a", "b", "c", "d"]);
        assert_eq!(map.entry_at(1), Some(("b".to_string(), Node::from("two"))));
        assert_eq!(map.entry_at(4), None);
    }

    #[test]
    fn conversion_from_value_keeps_document_order() {
        let value: Value = serde_json::from_str(r#"{"z":1,"a":[true,null],"m":{"x":"y"}}"#)
            .expect("valid json");
        let node = Node::from(value.clone());
        let map = node.as_object().expect("object");
        assert_eq!(map.keys(), ["z", "a", "m"]);
        assert_eq!(Value::from(&node), value);
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert!(Node::from(f64::NAN).is_null());
        assert!(Node::from(f64::INFINITY).is_null());
        assert_eq!(Node::from(1.5).kind(), "number");
    }

    #[test]
    fn serialize_impl_produces_valid_json() {
        let node = Node::from(json!({"q": "say \"hi\"", "n": [1, 2.5, null]}));
        let text = serde_json::to_string(&node).expect("encode");
        assert_eq!(text, r#"{"q":"say \"hi\"","n":[1,2.5,null]}"#);
    }
}
