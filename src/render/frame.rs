use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CandleStroke, StatusLabel};

/// Everything one draw pass paints: candle strokes in paint order, or a
/// status label when there is no chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub strokes: Vec<CandleStroke>,
    pub label: Option<StatusLabel>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            strokes: Vec::new(),
            label: None,
        }
    }

    /// An empty frame is valid on any viewport, so a zero-area canvas draws
    /// as a no-op.
    pub fn validate(&self) -> ChartResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.strokes.iter().try_for_each(CandleStroke::validate)?;
        self.label.as_ref().map_or(Ok(()), StatusLabel::validate)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.label.is_none()
    }
}
