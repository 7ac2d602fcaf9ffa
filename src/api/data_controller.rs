use std::sync::Arc;

use tracing::debug;

use crate::core::{Candle, PriceRange};
use crate::render::Renderer;

use super::invalidation::InvalidationTopic;
use super::{ChartEngine, LoadState};

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the candle list as a whole.
    ///
    /// The previous list is never mutated; readers holding it through
    /// `shared_candles` keep a consistent view. Selection is cleared.
    pub fn set_candles(&mut self, candles: impl Into<Arc<[Candle]>>) {
        let candles = candles.into();
        self.price_range = PriceRange::from_candles(&candles);
        debug!(
            candle_count = candles.len(),
            price_range = ?self.price_range,
            "set candles"
        );
        self.candles = candles;
        self.status_message = None;
        self.interaction.set_selected(None);
        self.invalidate(InvalidationTopic::Series);
    }

    /// Drops the candle list and shows `message` instead of a chart.
    pub fn show_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.status_message.as_deref() == Some(message.as_str()) && self.candles.is_empty() {
            return;
        }
        debug!(%message, "show status");
        self.candles = Arc::from(Vec::<Candle>::new());
        self.price_range = None;
        self.status_message = Some(message);
        self.interaction.on_pointer_leave();
        self.invalidate(InvalidationTopic::Status);
    }

    /// Mirrors a loader state: success draws its candles, every other state
    /// draws its status text.
    pub fn apply_load_state(&mut self, state: &LoadState) {
        match state {
            LoadState::Success { candles, .. } => {
                if !Arc::ptr_eq(candles, &self.candles) || self.status_message.is_some() {
                    self.set_candles(Arc::clone(candles));
                }
            }
            other => {
                if let Some(message) = other.status_message() {
                    self.show_status(message);
                }
            }
        }
    }
}
