use std::sync::Arc;

use tracing::trace;

use crate::core::{Candle, CandleSlots, PriceRange, PriceScale, Viewport};
use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::render::{RenderFrame, Renderer};

use super::frame_builder::{build_candle_frame, build_status_frame};
use super::invalidation::{InvalidationTopic, InvalidationTopics};
use super::{ChartEngineConfig, ChartStyle};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the current candle list, the viewport, the pointer
/// selection and a renderer. Frames are pure functions of those inputs and
/// are only redrawn after one of them changed.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) style: ChartStyle,
    pub(super) candles: Arc<[Candle]>,
    pub(super) price_range: Option<PriceRange>,
    pub(super) status_message: Option<String>,
    pub(super) interaction: InteractionState,
    pub(super) pending: InvalidationTopics,
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with no candles.
    ///
    /// A zero-area viewport is accepted; it simply draws nothing.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let style = config.style.validate()?;
        Ok(Self {
            renderer,
            viewport: config.viewport,
            style,
            candles: Arc::from(Vec::<Candle>::new()),
            price_range: None,
            status_message: None,
            interaction: InteractionState::default(),
            pending: InvalidationTopics::all(),
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.invalidate(InvalidationTopic::Viewport);
    }

    #[must_use]
    pub fn style(&self) -> ChartStyle {
        self.style
    }

    pub fn set_style(&mut self, style: ChartStyle) -> ChartResult<()> {
        self.style = style.validate()?;
        self.invalidate(InvalidationTopic::Style);
        Ok(())
    }

    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Shared handle to the current list; stays valid after a replacement.
    #[must_use]
    pub fn shared_candles(&self) -> Arc<[Candle]> {
        Arc::clone(&self.candles)
    }

    /// Price extent of the current list, cached per list.
    #[must_use]
    pub fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }

    #[must_use]
    pub fn price_scale(&self) -> Option<PriceScale> {
        self.price_range.map(|range| {
            PriceScale::new(
                range,
                self.viewport.height_px(),
                self.style.vertical_padding_px,
            )
        })
    }

    /// Slot layout for the current list, `None` when nothing is drawn.
    #[must_use]
    pub fn slots(&self) -> Option<CandleSlots> {
        if !self.viewport.is_valid() || self.status_message.is_some() {
            return None;
        }
        CandleSlots::new(
            self.candles.len(),
            self.viewport.width_px(),
            self.style.body_width_ratio,
        )
    }

    #[must_use]
    pub fn map_price_to_pixel(&self, price: f64) -> Option<f64> {
        self.price_scale().map(|scale| scale.price_to_pixel(price))
    }

    #[must_use]
    pub fn map_pixel_to_price(&self, pixel: f64) -> Option<f64> {
        self.price_scale().map(|scale| scale.pixel_to_price(pixel))
    }

    /// Text drawn instead of the chart (idle, loading or failed loads).
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        match &self.status_message {
            Some(message) => build_status_frame(self.viewport, message, &self.style),
            None => build_candle_frame(
                &self.candles,
                self.viewport,
                self.interaction.selected_index(),
                &self.style,
            ),
        }
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        trace!(
            strokes = frame.strokes.len(),
            status = frame.label.is_some(),
            "rendered frame"
        );
        self.pending = InvalidationTopics::none();
        Ok(())
    }

    /// Renders only when an input changed since the last frame.
    pub fn render_if_invalidated(&mut self) -> ChartResult<bool> {
        if !self.has_pending_invalidation() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame();
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.pending = InvalidationTopics::none();
        Ok(())
    }

    #[must_use]
    pub fn has_pending_invalidation(&self) -> bool {
        !self.pending.is_none()
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationTopics {
        self.pending
    }

    pub fn clear_pending_invalidation(&mut self) {
        self.pending = InvalidationTopics::none();
    }

    pub(super) fn invalidate(&mut self, topic: InvalidationTopic) {
        self.pending = self.pending.with_topic(topic);
        trace!(?topic, "invalidate");
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
