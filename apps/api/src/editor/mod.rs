// Document editing: tree mutations, drag-reorder decisions, inline-edit
// draft state, and the HTTP handlers that expose the mutations.

pub mod draft;
pub mod handlers;
pub mod ops;
pub mod reorder;
