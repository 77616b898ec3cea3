//! Site map store: the single writer for notes and connections.
//!
//! # Responsibility
//! - Own the canonical note and connection lists.
//! - Funnel every mutation, including import results, through one object.
//! - Derive tree/table projections on demand.
//!
//! # Invariants
//! - Note ids are unique within the store.
//! - No connection outlives either of its endpoints.
//! - At most one import is in flight.
//!
//! # See also
//! - `crate::tree::forest` for projection rules.

pub mod sample;
pub mod site_map_store;
