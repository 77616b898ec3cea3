//! Tree derivation for the hierarchical views.
//!
//! # Responsibility
//! - Turn the flat note list into a forest using one hierarchy signal.
//! - Flatten a forest into indented table rows.
//! - Track which tree rows are expanded in the tree view.
//!
//! # Invariants
//! - The forest is recomputed from source data, never patched.
//! - Cyclic links are truncated, never followed twice on one path.

pub mod expansion;
pub mod forest;
