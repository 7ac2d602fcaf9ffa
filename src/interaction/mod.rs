use serde::{Deserialize, Serialize};

use crate::core::CandleHit;

/// Pointer state shared between pointer events and the next draw.
///
/// Pointer handlers only write here; the frame builder only reads.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    cursor_x: Option<f64>,
    selected: Option<usize>,
}

impl InteractionState {
    /// Last canvas-local pointer X, `None` once the pointer left.
    #[must_use]
    pub fn cursor_x(self) -> Option<f64> {
        self.cursor_x
    }

    #[must_use]
    pub fn selected_index(self) -> Option<usize> {
        self.selected
    }

    /// Records a pointer move and its hit. Returns `true` when the selection changed.
    pub fn on_pointer_move(&mut self, x: f64, hit: CandleHit) -> bool {
        self.cursor_x = Some(x);
        self.set_selected(hit.index())
    }

    pub fn on_pointer_leave(&mut self) -> bool {
        self.cursor_x = None;
        self.set_selected(None)
    }

    pub fn set_selected(&mut self, selected: Option<usize>) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        true
    }
}
