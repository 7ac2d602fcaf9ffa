use serde::{Deserialize, Serialize};

use crate::core::Candle;

/// Default blank band kept above the highest and below the lowest price.
pub const DEFAULT_VERTICAL_PADDING_PX: f64 = 20.0;

/// Lowest `low` and highest `high` across a candle list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        if candles.is_empty() {
            return None;
        }

        let (min, max) = candles
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), candle| {
                (min.min(candle.low), max.max(candle.high))
            });
        Some(Self { min, max })
    }

    /// `max - min`; may overflow to infinity for extreme finite prices.
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Every candle sits on the same price.
    #[must_use]
    pub fn is_flat(self) -> bool {
        self.max == self.min
    }

    /// Position of `price` within the range, `0` at `max` and `1` at `min`.
    ///
    /// Computed on halved values so the whole `f64` range never overflows.
    fn depth_of(self, price: f64) -> f64 {
        (self.max / 2.0 - price / 2.0) / (self.max / 2.0 - self.min / 2.0)
    }
}

/// Linear, inverted price-to-pixel transform over the plot band
/// `[padding, height - padding]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    range: PriceRange,
    height_px: f64,
    vertical_padding_px: f64,
}

impl PriceScale {
    #[must_use]
    pub fn new(range: PriceRange, height_px: f64, vertical_padding_px: f64) -> Self {
        Self {
            range,
            height_px,
            vertical_padding_px,
        }
    }

    #[must_use]
    pub fn range(self) -> PriceRange {
        self.range
    }

    #[must_use]
    pub fn available_height(self) -> f64 {
        self.height_px - 2.0 * self.vertical_padding_px
    }

    /// Maps a price to a y coordinate; higher prices land higher on screen.
    ///
    /// A flat range maps every price to the vertical centre of the plot band.
    #[must_use]
    pub fn price_to_pixel(self, price: f64) -> f64 {
        let available = self.available_height();
        if self.range.is_flat() {
            return self.vertical_padding_px + available / 2.0;
        }
        available * self.range.depth_of(price) + self.vertical_padding_px
    }

    /// Inverse of [`Self::price_to_pixel`]. A flat range or an empty plot band
    /// maps every pixel to the range minimum.
    #[must_use]
    pub fn pixel_to_price(self, pixel: f64) -> f64 {
        let available = self.available_height();
        if self.range.is_flat() || available == 0.0 {
            return self.range.min;
        }
        let depth = (pixel - self.vertical_padding_px) / available;
        self.range.max * (1.0 - depth) + self.range.min * depth
    }
}
