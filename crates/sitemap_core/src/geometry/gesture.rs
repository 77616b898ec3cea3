//! Pointer gesture state machine for the canvas.
//!
//! A gesture runs from pointer-down to pointer-up and is exactly one of:
//! dragging a note, or panning the viewport. Never both.

use crate::geometry::{accumulate_pan, Point, Viewport};
use crate::model::note::NoteId;

/// What the pointer landed on at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteHit {
    pub id: NoteId,
    /// Note position in canvas space at the moment of the hit.
    pub position: Point,
}

/// Active gesture state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    DraggingNote {
        id: NoteId,
        /// Pointer position relative to the note origin, in canvas space.
        grab_offset: Point,
    },
    Panning {
        last_screen: Point,
    },
}

/// Result of one pointer-move sample.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEffect {
    MoveNote { id: NoteId, position: Point },
    Pan { pan: Point },
}

/// Tracks one pointer gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    state: Gesture,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Gesture {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == Gesture::Idle
    }

    /// Starts a gesture. A hit on a note starts a drag, otherwise a pan.
    ///
    /// Returns `false` and keeps the current gesture when one is already active.
    pub fn pointer_down(
        &mut self,
        viewport: &Viewport,
        screen: Point,
        hit: Option<NoteHit>,
    ) -> bool {
        if !self.is_idle() {
            return false;
        }

        self.state = match hit {
            Some(hit) => Gesture::DraggingNote {
                grab_offset: viewport.screen_to_canvas(screen) - hit.position,
                id: hit.id,
            },
            None => Gesture::Panning { last_screen: screen },
        };
        true
    }

    /// Applies one pointer-move sample; each sample supersedes the previous one.
    pub fn pointer_move(
        &mut self,
        viewport: &mut Viewport,
        screen: Point,
    ) -> Option<GestureEffect> {
        match &mut self.state {
            Gesture::Idle => None,
            Gesture::DraggingNote { id, grab_offset } => Some(GestureEffect::MoveNote {
                id: id.clone(),
                position: viewport.screen_to_canvas(screen) - *grab_offset,
            }),
            Gesture::Panning { last_screen } => {
                let pan = accumulate_pan(viewport.pan(), screen, *last_screen);
                viewport.set_pan(pan);
                *last_screen = screen;
                Some(GestureEffect::Pan { pan })
            }
        }
    }

    /// Ends the active gesture and returns it.
    pub fn pointer_up(&mut self) -> Gesture {
        std::mem::take(&mut self.state)
    }
}
