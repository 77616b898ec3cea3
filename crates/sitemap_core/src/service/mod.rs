//! View-facing services.
//!
//! # Responsibility
//! - Translate view intents into store mutations.
//! - Keep rendering surfaces from touching store data directly.

pub mod canvas_service;
