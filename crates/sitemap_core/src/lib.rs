//! Core domain logic for the site map tool.
//! This crate is the single source of truth for note/connection invariants.

pub mod config;
pub mod export;
pub mod geometry;
pub mod import;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod tree;

pub use config::{ConfigError, SiteMapConfig};
pub use export::{export_notes, ExportArtifact, ExportError, ExportFormat};
pub use geometry::gesture::{Gesture, GestureEffect, GestureTracker, NoteHit};
pub use geometry::{
    accumulate_pan, clamp_scale, clamp_scale_within, screen_to_canvas, Point, Viewport,
    ZoomLimits,
};
pub use import::{
    DemoImportSource, FetchedImport, ImportError, ImportMode, ImportSource, ImportSummary,
    PendingImport, SiteBatch,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::color::is_valid_color_token;
pub use model::note::{Connection, Note, NoteId};
pub use model::tree::{FlatRow, TreeNode};
pub use service::canvas_service::CanvasService;
pub use store::site_map_store::{SiteMapStore, StoreError, StoreResult};
pub use tree::expansion::TreeExpansion;
pub use tree::forest::{build_forest, flatten, Hierarchy, HierarchyMode};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
