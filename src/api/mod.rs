//! Purpose: Define the stable public Rust API boundary for dyndoc.
//! Exports: Document view, node model, rendering entry points, and errors.
//! Role: Public, additive-only surface used by the CLI and downstream callers.
//! Invariants: Everything a caller needs for get/set/iterate/serialize is reachable here.

pub use crate::core::document::{DynamicDocument, Entries, Member, Members, WrapPolicy};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::node::{Node, ObjectMap};
pub use crate::core::render::{RenderOptions, serialize, serialize_with};
pub use crate::json::parse::{document_from_str, from_str};
