use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        let channels = [self.red, self.green, self.blue, self.alpha];
        if channels
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
        {
            return Ok(());
        }
        Err(ChartError::InvalidData(format!(
            "color channels must be in [0, 1], got {channels:?}"
        )))
    }
}

/// Which part of a candle a stroke paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrokeKind {
    /// Full-height marker beneath the selected candle.
    Guide,
    Wick,
    Body,
    /// Single short mark standing in for a candle with `low == high`.
    FlatMark,
}

/// One vertical stroke at `x`, spanning `y_from..y_to` in canvas pixels.
///
/// The stroke is centred on `x`, so a wide stroke paints a filled bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleStroke {
    pub index: usize,
    pub kind: StrokeKind,
    pub x: f64,
    pub y_from: f64,
    pub y_to: f64,
    pub width: f64,
    pub color: Color,
}

impl CandleStroke {
    pub fn validate(&self) -> ChartResult<()> {
        if !(self.x.is_finite() && self.y_from.is_finite() && self.y_to.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "{:?} stroke of candle {} has non-finite coordinates",
                self.kind, self.index
            )));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{:?} stroke of candle {} needs a positive width",
                self.kind, self.index
            )));
        }
        self.color.validate()
    }
}

/// Text drawn centred on `(center_x, center_y)` in place of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLabel {
    pub text: String,
    pub center_x: f64,
    pub center_y: f64,
    pub font_size_px: f64,
    pub color: Color,
}

impl StatusLabel {
    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData("status label is empty".to_owned()));
        }
        if !(self.center_x.is_finite() && self.center_y.is_finite()) {
            return Err(ChartError::InvalidData(
                "status label position must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "status label font size must be > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
