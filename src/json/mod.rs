//! Purpose: JSON text boundary that produces `Node` trees for documents.
//! Exports: `parse` module with decode helpers used by the CLI and tests.
//! Role: Single seam for parser usage so callsites avoid ad hoc decode logic.
//! Invariants: Object key order in the input text is preserved in the produced tree.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub mod parse;
