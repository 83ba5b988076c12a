// Core modules implementing the document model, member access, rendering, and errors.
pub mod document;
pub mod error;
pub mod node;
pub mod render;
