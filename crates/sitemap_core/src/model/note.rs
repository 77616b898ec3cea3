//! Note and connection records.
//!
//! # Responsibility
//! - Define the canonical page marker shared by canvas/tree/table views.
//! - Define directed connections between notes.
//!
//! # Invariants
//! - `id` is generated once and never reassigned to another note.
//! - `parent_id` is a hierarchy hint only; dangling values are tolerated.
//! - Connection endpoints should reference existing notes.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque note identifier.
///
/// Kept as a type alias so imported ids (which are not UUIDs) stay valid.
pub type NoteId = String;

/// Title assigned to notes created from the toolbar.
pub const DEFAULT_NOTE_TITLE: &str = "New Page";
/// Description assigned to notes created from the toolbar.
pub const DEFAULT_NOTE_DESCRIPTION: &str = "Add description here";
/// Stacking order for freshly created notes.
pub const DEFAULT_Z_INDEX: i64 = 1;

/// Canvas page marker ("post-it note").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub description: String,
    /// Display hint, e.g. `#ffcc80`.
    pub color: String,
    /// Canvas-space top-left corner.
    pub position: Point,
    #[serde(default = "default_z_index")]
    pub z_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NoteId>,
}

impl Note {
    /// Creates a note with a generated id and default texts.
    pub fn new(color: impl Into<String>, position: Point) -> Self {
        Self::with_id(generate_note_id(), color, position)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: impl Into<NoteId>, color: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_NOTE_TITLE.to_string(),
            description: DEFAULT_NOTE_DESCRIPTION.to_string(),
            color: color.into(),
            position,
            z_index: DEFAULT_Z_INDEX,
            parent_id: None,
        }
    }

    /// Builder-style title setter.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder-style description setter.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style parent setter.
    pub fn under(mut self, parent_id: impl Into<NoteId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// Directed edge between two notes, rendered as an arrow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: NoteId,
    pub to: NoteId,
}

impl Connection {
    pub fn new(from: impl Into<NoteId>, to: impl Into<NoteId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns whether `id` is either endpoint.
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

/// Generates a fresh opaque note id.
pub fn generate_note_id() -> NoteId {
    Uuid::new_v4().to_string()
}

fn default_z_index() -> i64 {
    DEFAULT_Z_INDEX
}

#[cfg(test)]
mod tests {
    use super::{Connection, Note, DEFAULT_NOTE_TITLE};
    use crate::geometry::Point;

    #[test]
    fn new_note_gets_defaults_and_unique_id() {
        let a = Note::new("#ffcc80", Point::new(1.0, 2.0));
        let b = Note::new("#ffcc80", Point::new(1.0, 2.0));
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, DEFAULT_NOTE_TITLE);
        assert_eq!(a.z_index, 1);
        assert!(a.parent_id.is_none());
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let note = Note::with_id("n1", "#80deea", Point::new(10.0, 20.0)).under("root");
        let json = serde_json::to_value(&note).expect("note should serialize");
        assert_eq!(json["zIndex"], 1);
        assert_eq!(json["parentId"], "root");
        assert_eq!(json["position"]["x"], 10.0);

        let root = Note::with_id("root", "#80deea", Point::new(0.0, 0.0));
        let json = serde_json::to_value(&root).expect("note should serialize");
        assert!(json.get("parentId").is_none());
    }

    #[test]
    fn connection_touches_both_endpoints() {
        let edge = Connection::new("a", "b");
        assert!(edge.touches("a"));
        assert!(edge.touches("b"));
        assert!(!edge.touches("c"));
    }
}
