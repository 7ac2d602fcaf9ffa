use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_BODY_WIDTH_RATIO, DEFAULT_VERTICAL_PADDING_PX, DecoderOptions, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors and sizes used when turning candles into draw commands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub bullish_color: Color,
    pub bearish_color: Color,
    /// Flat marks and the selection guide.
    pub neutral_color: Color,
    pub status_text_color: Color,
    /// Body width as a share of the slot width, in `(0, 1]`.
    pub body_width_ratio: f64,
    pub vertical_padding_px: f64,
    pub wick_width_px: f64,
    pub flat_mark_height_px: f64,
    pub status_font_size_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bullish_color: Color::rgb(0.0, 128.0 / 255.0, 0.0),
            bearish_color: Color::rgb(1.0, 0.0, 0.0),
            neutral_color: Color::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0),
            status_text_color: Color::rgb(0.2, 0.2, 0.2),
            body_width_ratio: DEFAULT_BODY_WIDTH_RATIO,
            vertical_padding_px: DEFAULT_VERTICAL_PADDING_PX,
            wick_width_px: 1.0,
            flat_mark_height_px: 1.0,
            status_font_size_px: 14.0,
        }
    }
}

impl ChartStyle {
    pub fn validate(self) -> ChartResult<Self> {
        self.bullish_color.validate()?;
        self.bearish_color.validate()?;
        self.neutral_color.validate()?;
        self.status_text_color.validate()?;

        if !self.body_width_ratio.is_finite()
            || self.body_width_ratio <= 0.0
            || self.body_width_ratio > 1.0
        {
            return Err(ChartError::InvalidData(
                "body width ratio must be finite and in (0, 1]".to_owned(),
            ));
        }
        if !self.vertical_padding_px.is_finite() || self.vertical_padding_px < 0.0 {
            return Err(ChartError::InvalidData(
                "vertical padding must be finite and >= 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("wick width", self.wick_width_px),
            ("flat mark height", self.flat_mark_height_px),
            ("status font size", self.status_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub style: ChartStyle,
    #[serde(default)]
    pub decoder: DecoderOptions,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            style: ChartStyle::default(),
            decoder: DecoderOptions::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_decoder_options(mut self, decoder: DecoderOptions) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.style.validate()?;
        Ok(config)
    }
}
