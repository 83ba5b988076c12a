//! Purpose: Library crate behind the `dyndoc` CLI and tests.
//! Exports: `api` (stable surface), `core` (model, access, rendering, errors), `json`.
//! Role: Member-access adapter and order-preserving renderer for untyped JSON documents.
//! Invariants: Documents are views over shared maps; nothing is copied on access.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
pub mod json;
