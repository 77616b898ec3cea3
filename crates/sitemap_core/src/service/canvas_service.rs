//! Canvas view use-case service.
//!
//! # Responsibility
//! - Own per-view state: viewport, active gesture, selection, pending connection.
//! - Turn pointer/wheel/button intents into store mutations.
//!
//! # Invariants
//! - One pointer gesture either moves one note or pans; never both.
//! - Every note mutation goes through `SiteMapStore`.

use crate::geometry::gesture::{Gesture, GestureEffect, GestureTracker, NoteHit};
use crate::geometry::{Point, Viewport, ZoomLimits};
use crate::model::note::{Note, NoteId};
use crate::store::site_map_store::{SiteMapStore, StoreError, StoreResult};
use log::{debug, info};

/// Rendered note width and height in canvas units.
pub const NOTE_SIZE: f64 = 192.0;

/// Headless state behind one canvas view.
#[derive(Debug, Clone, Default)]
pub struct CanvasService {
    viewport: Viewport,
    gestures: GestureTracker,
    selected: Option<NoteId>,
    connecting_from: Option<NoteId>,
}

impl CanvasService {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            viewport: Viewport::new(limits),
            ..Self::default()
        }
    }

    /// Creates a canvas using the store's zoom configuration.
    pub fn for_store(store: &SiteMapStore) -> Self {
        Self::new(store.config().zoom)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn gesture(&self) -> &Gesture {
        self.gestures.state()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn connecting_from(&self) -> Option<&str> {
        self.connecting_from.as_deref()
    }

    /// Returns the topmost note under a screen point.
    ///
    /// Higher `z_index` wins; on ties the later note (drawn last) wins.
    pub fn hit_test(&self, store: &SiteMapStore, screen: Point) -> Option<NoteId> {
        let canvas = self.viewport.screen_to_canvas(screen);
        store
            .notes()
            .iter()
            .enumerate()
            .filter(|(_, note)| contains_point(note, canvas))
            .max_by_key(|(order, note)| (note.z_index, *order))
            .map(|(_, note)| note.id.clone())
    }

    /// Handles pointer-down on `hit` (a note id) or on empty canvas.
    ///
    /// - While a connection is pending, a note hit completes it.
    /// - A note hit selects the note and starts dragging it.
    /// - Empty canvas starts a pan and drops any pending connection.
    pub fn pointer_down(
        &mut self,
        store: &mut SiteMapStore,
        screen: Point,
        hit: Option<&str>,
    ) -> StoreResult<bool> {
        if !self.gestures.is_idle() {
            return Ok(false);
        }

        let Some(id) = hit else {
            self.connecting_from = None;
            return Ok(self.gestures.pointer_down(&self.viewport, screen, None));
        };

        if self.connecting_from.is_some() {
            self.complete_connection(store, id)?;
            return Ok(false);
        }

        self.select(store, id)?;
        let position = store
            .note(id)
            .map(|note| note.position)
            .ok_or_else(|| StoreError::NoteNotFound(id.to_string()))?;
        let hit = NoteHit {
            id: id.to_string(),
            position,
        };
        Ok(self.gestures.pointer_down(&self.viewport, screen, Some(hit)))
    }

    /// Applies one pointer-move sample.
    ///
    /// A drag whose note disappeared mid-gesture is ended and reports the error.
    pub fn pointer_move(
        &mut self,
        store: &mut SiteMapStore,
        screen: Point,
    ) -> StoreResult<Option<GestureEffect>> {
        let effect = self.gestures.pointer_move(&mut self.viewport, screen);
        if let Some(GestureEffect::MoveNote { id, position }) = &effect {
            if let Err(err) = store.move_note(id, *position) {
                self.gestures.pointer_up();
                return Err(err);
            }
        }
        Ok(effect)
    }

    pub fn pointer_up(&mut self) -> Gesture {
        let finished = self.gestures.pointer_up();
        if let Gesture::DraggingNote { id, .. } = &finished {
            debug!("event=note_drag_end module=canvas status=ok id={id}");
        }
        finished
    }

    /// Applies a wheel notch and returns the new scale.
    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        self.viewport.zoom_by_wheel(delta_y)
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.viewport.zoom_out()
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Selects a note and raises it above the others.
    pub fn select(&mut self, store: &mut SiteMapStore, id: &str) -> StoreResult<()> {
        store.bring_to_front(id)?;
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Marks `id` as the source of the next connection.
    pub fn start_connection(&mut self, store: &SiteMapStore, id: &str) -> StoreResult<()> {
        if !store.contains(id) {
            return Err(StoreError::NoteNotFound(id.to_string()));
        }
        self.connecting_from = Some(id.to_string());
        Ok(())
    }

    /// Connects the pending source to `to`. The pending source is consumed
    /// whether or not the store accepts the connection.
    pub fn complete_connection(&mut self, store: &mut SiteMapStore, to: &str) -> StoreResult<()> {
        let Some(from) = self.connecting_from.take() else {
            return Ok(());
        };
        store.connect(&from, to)
    }

    pub fn cancel_connection(&mut self) {
        self.connecting_from = None;
    }

    /// Deletes the selected note, if any.
    pub fn delete_selected(&mut self, store: &mut SiteMapStore) -> StoreResult<Option<Note>> {
        let Some(id) = self.selected.take() else {
            return Ok(None);
        };
        if self.connecting_from.as_deref() == Some(id.as_str()) {
            self.connecting_from = None;
        }
        let removed = store.delete_note(&id)?;
        info!("event=canvas_delete module=canvas status=ok");
        Ok(Some(removed))
    }
}

fn contains_point(note: &Note, canvas: Point) -> bool {
    let Point { x, y } = note.position;
    canvas.x >= x && canvas.x <= x + NOTE_SIZE && canvas.y >= y && canvas.y <= y + NOTE_SIZE
}
