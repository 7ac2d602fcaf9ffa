use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One OHLC record decoded from a raw series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Builds a validated candle.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        let candle = Self::from_raw(open, high, low, close)?;
        if !candle.has_consistent_range() {
            return Err(ChartError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }
        Ok(candle)
    }

    /// Builds a candle checking only that every value is finite.
    pub fn from_raw(open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }

    /// Flat placeholder candle carrying `price` in all four fields.
    #[must_use]
    pub const fn filler(price: f64) -> Self {
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }

    #[must_use]
    pub fn has_consistent_range(self) -> bool {
        self.low <= self.high
            && (self.low..=self.high).contains(&self.open)
            && (self.low..=self.high).contains(&self.close)
    }

    /// `low == high`: drawn as a single flat mark. Every filler candle is flat.
    #[must_use]
    pub fn is_flat(self) -> bool {
        self.low == self.high
    }

    /// Strictly lower close than open. Equal open/close counts as bullish.
    #[must_use]
    pub fn is_bearish(self) -> bool {
        self.close < self.open
    }

    #[must_use]
    pub fn is_bullish(self) -> bool {
        !self.is_bearish()
    }
}
