//! Purpose: Member-access view over a shared object map with lazy wrapping of nested values.
//! Exports: `DynamicDocument`, `Member`, `Members`, `Entries`, `WrapPolicy`.
//! Role: Core accessor surface (get, set, ordered iteration) for untyped documents.
//! Invariants: A document is a view; it never copies its backing map.
//! Invariants: Reads recompute wrapping every time; nothing is cached.
//! Invariants: get/set/iterate never fail; absent keys resolve to `Member::Null`.
use std::fmt;

use serde_json::Value;

use crate::core::node::{Node, ObjectMap};
use crate::core::render::{RenderOptions, serialize_with};

/// How list elements are wrapped when a list member is read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WrapPolicy {
    /// Wrap map elements only when the first element is a map. Later maps in a list
    /// whose first element is a scalar stay raw.
    #[default]
    FirstElement,
    /// Wrap every map element regardless of position.
    EveryElement,
}

/// Result of reading a member.
#[derive(Clone, Debug, PartialEq)]
pub enum Member {
    /// Absent key or stored null. The two are deliberately indistinguishable.
    Null,
    Document(DynamicDocument),
    Sequence(Vec<Member>),
    /// Stored value passed through untouched (scalars and empty lists).
    Value(Node),
}

impl Member {
    pub fn is_null(&self) -> bool {
        matches!(self, Member::Null)
    }

    pub fn as_document(&self) -> Option<&DynamicDocument> {
        match self {
            Member::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Member]> {
        match self {
            Member::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Member::Value(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_node().and_then(Node::as_str)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Member::Null => "null",
            Member::Document(_) => "document",
            Member::Sequence(_) => "sequence",
            Member::Value(_) => "value",
        }
    }

    /// Strict JSON form of the member, independent of the compatibility renderer.
    pub fn to_json_value(&self) -> Value {
        match self {
            Member::Null => Value::Null,
            Member::Document(doc) => Value::from(&Node::Object(doc.backing())),
            Member::Sequence(items) => {
                Value::Array(items.iter().map(Member::to_json_value).collect())
            }
            Member::Value(node) => Value::from(node),
        }
    }
}

/// Capability surface for member-style access.
pub trait Members {
    fn get(&self, name: &str) -> Member;
    fn set(&self, name: &str, value: Node);
    fn entries(&self) -> Entries;
}

#[derive(Clone, PartialEq)]
pub struct DynamicDocument {
    map: ObjectMap,
    policy: WrapPolicy,
}

impl DynamicDocument {
    pub fn new(map: ObjectMap) -> Self {
        Self::with_policy(map, WrapPolicy::default())
    }

    pub fn with_policy(map: ObjectMap, policy: WrapPolicy) -> Self {
        Self { map, policy }
    }

    /// Wraps `node` when it is an object; any other node has no document view.
    pub fn from_node(node: &Node) -> Option<Self> {
        node.as_object().cloned().map(Self::new)
    }

    pub fn policy(&self) -> WrapPolicy {
        self.policy
    }

    /// Handle to the backing map. The handle aliases the document's storage.
    pub fn backing(&self) -> ObjectMap {
        self.map.clone()
    }

    pub fn same_backing(&self, other: &DynamicDocument) -> bool {
        self.map.ptr_eq(&other.map)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, name: &str) -> Member {
        let Some(stored) = self.map.get(name) else {
            tracing::trace!(name = %name, "member absent; resolving to null");
            return Member::Null;
        };
        self.wrap(stored)
    }

    pub fn set(&self, name: &str, value: impl Into<Node>) {
        self.map.insert(name, value);
    }

    /// Raw `(key, node)` pairs in insertion order. Each call starts a fresh pass.
    pub fn entries(&self) -> Entries {
        Entries {
            map: self.map.clone(),
            next: 0,
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.map.keys()
    }

    pub fn serialize(&self) -> String {
        serialize_with(self, &RenderOptions::default())
    }

    fn wrap(&self, stored: Node) -> Member {
        match stored {
            Node::Null => Member::Null,
            Node::Object(map) => Member::Document(self.child(map)),
            Node::List(items) if !items.is_empty() => {
                let wrap_maps = match self.policy {
                    WrapPolicy::FirstElement => matches!(items[0], Node::Object(_)),
                    WrapPolicy::EveryElement => true,
                };
                let wrapped = items
                    .into_iter()
                    .map(|item| match item {
                        Node::Object(map) if wrap_maps => Member::Document(self.child(map)),
                        other => Member::Value(other),
                    })
                    .collect();
                Member::Sequence(wrapped)
            }
            other => Member::Value(other),
        }
    }

    fn child(&self, map: ObjectMap) -> DynamicDocument {
        DynamicDocument::with_policy(map, self.policy)
    }
}

impl Members for DynamicDocument {
    fn get(&self, name: &str) -> Member {
        DynamicDocument::get(self, name)
    }

    fn set(&self, name: &str, value: Node) {
        DynamicDocument::set(self, name, value)
    }

    fn entries(&self) -> Entries {
        DynamicDocument::entries(self)
    }
}

impl From<ObjectMap> for DynamicDocument {
    fn from(map: ObjectMap) -> Self {
        Self::new(map)
    }
}

impl From<DynamicDocument> for Node {
    fn from(doc: DynamicDocument) -> Self {
        Node::Object(doc.map)
    }
}

impl fmt::Debug for DynamicDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicDocument")
            .field("map", &self.map)
            .field("policy", &self.policy)
            .finish()
    }
}

impl fmt::Display for DynamicDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<'a> IntoIterator for &'a DynamicDocument {
    type Item = (String, Node);
    type IntoIter = Entries;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Lazy pass over a backing map's entries.
///
/// The map is borrowed only for the duration of each `next` call. Writing to the map
/// mid-pass does not panic, but which entries the pass then observes is unspecified.
#[derive(Clone, Debug)]
pub struct Entries {
    map: ObjectMap,
    next: usize,
}

impl Iterator for Entries {
    type Item = (String, Node);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.map.entry_at(self.next)?;
        self.next += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.map.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}
