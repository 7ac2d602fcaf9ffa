use cairo::{Context, Format, ImageSurface, LineCap, Operator};
use pango::FontDescription;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CandleStroke, Color, RenderFrame, Renderer, StatusLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub strokes_drawn: usize,
    pub labels_drawn: usize,
}

/// Renderers that can paint into a context owned by the host, for example a
/// toolkit draw callback.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> ChartResult<()>;
}

/// Paints candle frames with cairo and status labels with pango.
///
/// Each pass clears to transparent first, so the host background shows
/// through everywhere no candle is drawn.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    /// Offscreen surface matching the viewport's backing-store size.
    pub fn for_viewport(viewport: Viewport) -> ChartResult<Self> {
        let (Ok(width), Ok(height)) = (
            i32::try_from(viewport.width),
            i32::try_from(viewport.height),
        ) else {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        };
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| cairo_error("create surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn paint(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        context.save().map_err(|err| cairo_error("save state", err))?;
        context.set_operator(Operator::Clear);
        context.paint().map_err(|err| cairo_error("clear", err))?;
        context.restore().map_err(|err| cairo_error("restore state", err))?;

        let mut stats = CairoRenderStats::default();
        context.set_line_cap(LineCap::Butt);
        for stroke in &frame.strokes {
            paint_stroke(context, stroke)?;
            stats.strokes_drawn += 1;
        }
        if let Some(label) = &frame.label {
            paint_label(context, label);
            stats.labels_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context =
            Context::new(&self.surface).map_err(|err| cairo_error("create context", err))?;
        self.paint(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.paint(context, frame)
    }
}

fn paint_stroke(context: &Context, stroke: &CandleStroke) -> ChartResult<()> {
    set_color(context, stroke.color);
    context.set_line_width(stroke.width);
    context.move_to(stroke.x, stroke.y_from);
    context.line_to(stroke.x, stroke.y_to);
    context.stroke().map_err(|err| {
        cairo_error(
            &format!("stroke {:?} of candle {}", stroke.kind, stroke.index),
            err,
        )
    })
}

fn paint_label(context: &Context, label: &StatusLabel) {
    let layout = pangocairo::functions::create_layout(context);
    let font = FontDescription::from_string(&format!("Sans {}px", label.font_size_px));
    layout.set_font_description(Some(&font));
    layout.set_text(&label.text);

    let (width, height) = layout.pixel_size();
    set_color(context, label.color);
    context.move_to(
        label.center_x - f64::from(width) / 2.0,
        label.center_y - f64::from(height) / 2.0,
    );
    pangocairo::functions::show_layout(context, &layout);
}

fn set_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn cairo_error(action: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("cairo failed to {action}: {err}"))
}
