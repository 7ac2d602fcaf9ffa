use tracing::trace;

use crate::core::{Candle, CandleHit};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;
use super::invalidation::InvalidationTopic;

impl<R: Renderer> ChartEngine<R> {
    /// Candle whose body spans canvas-local `x`.
    ///
    /// Always `NotFound` while no chart is shown.
    #[must_use]
    pub fn index_at_x(&self, x: f64) -> CandleHit {
        self.slots()
            .map_or(CandleHit::NotFound, |slots| slots.index_at_x(x))
    }

    /// Handles a pointer move in canvas-local backing-store pixels and
    /// updates the selection. With nothing drawn every move is a miss.
    pub fn pointer_move(&mut self, canvas_x: f64) -> CandleHit {
        let hit = self.index_at_x(canvas_x);
        if self.interaction.on_pointer_move(canvas_x, hit) {
            trace!(x = canvas_x, ?hit, "selection changed");
            self.invalidate(InvalidationTopic::Selection);
        }
        hit
    }

    /// Handles a pointer move given in page coordinates, with `canvas_left`
    /// the canvas' left edge in the same logical units.
    pub fn pointer_move_client(&mut self, client_x: f64, canvas_left: f64) -> CandleHit {
        let canvas_x = self.viewport.client_x_to_canvas(client_x, canvas_left);
        self.pointer_move(canvas_x)
    }

    pub fn pointer_leave(&mut self) {
        if self.interaction.on_pointer_leave() {
            self.invalidate(InvalidationTopic::Selection);
        }
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.interaction.selected_index()
    }

    /// Candle under the selection, for info panels.
    #[must_use]
    pub fn selected_candle(&self) -> Option<Candle> {
        self.selected_index()
            .and_then(|index| self.candles.get(index).copied())
    }

    pub fn set_selected_index(&mut self, index: Option<usize>) -> ChartResult<()> {
        match index {
            Some(index) if index >= self.candles.len() => {
                return Err(ChartError::InvalidData(format!(
                    "selected index {index} out of range for {} candles",
                    self.candles.len()
                )));
            }
            _ => {}
        }
        if self.interaction.set_selected(index) {
            self.invalidate(InvalidationTopic::Selection);
        }
        Ok(())
    }
}
