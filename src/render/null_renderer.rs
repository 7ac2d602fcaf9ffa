use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer: validates each frame and keeps the last one.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_stroke_count: usize,
    pub render_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl NullRenderer {
    /// Text of the status label in the last frame, if any.
    #[must_use]
    pub fn last_label(&self) -> Option<&str> {
        self.last_frame
            .as_ref()
            .and_then(|frame| frame.label.as_ref())
            .map(|label| label.text.as_str())
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_stroke_count = frame.strokes.len();
        self.render_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
