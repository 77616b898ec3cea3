//! Site map domain model.
//!
//! # Responsibility
//! - Define the canonical note and connection records every view reads.
//! - Define derived tree/table projections that are rebuilt, never patched.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - `TreeNode` and `FlatRow` are never a source of truth.

pub mod color;
pub mod note;
pub mod tree;
