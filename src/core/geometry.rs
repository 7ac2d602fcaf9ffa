use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

/// Share of a slot covered by the candle body.
pub const DEFAULT_BODY_WIDTH_RATIO: f64 = 0.8;

/// Result of a horizontal hit test.
///
/// Index `0` is a regular hit; absence is its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandleHit {
    Found(usize),
    NotFound,
}

impl CandleHit {
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Found(index) => Some(index),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl From<CandleHit> for Option<usize> {
    fn from(hit: CandleHit) -> Self {
        hit.index()
    }
}

/// Horizontal placement of one candle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub slot_width: f64,
    pub body_width: f64,
}

impl CandleGeometry {
    #[must_use]
    pub fn body_left(self) -> f64 {
        self.center_x - self.body_width / 2.0
    }

    #[must_use]
    pub fn body_right(self) -> f64 {
        self.center_x + self.body_width / 2.0
    }

    /// Inclusive on both body edges.
    #[must_use]
    pub fn contains_x(self, x: f64) -> bool {
        self.body_left() <= x && x <= self.body_right()
    }
}

/// Fixed-width slot layout for `count` candles across a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleSlots {
    count: usize,
    slot_width: f64,
    body_width: f64,
}

impl CandleSlots {
    /// Returns `None` when there is nothing to lay out: no candles, or a
    /// canvas without positive finite width.
    #[must_use]
    pub fn new(count: usize, canvas_width: f64, body_width_ratio: f64) -> Option<Self> {
        if count == 0 || !canvas_width.is_finite() || canvas_width <= 0.0 {
            return None;
        }

        let slot_width = canvas_width / count as f64;
        Some(Self {
            count,
            slot_width,
            body_width: slot_width * body_width_ratio,
        })
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn slot_width(self) -> f64 {
        self.slot_width
    }

    #[must_use]
    pub fn body_width(self) -> f64 {
        self.body_width
    }

    #[must_use]
    pub fn center_x(self, index: usize) -> f64 {
        self.slot_width * index as f64 + self.slot_width / 2.0
    }

    #[must_use]
    pub fn geometry(self, index: usize) -> Option<CandleGeometry> {
        (index < self.count).then(|| self.geometry_unchecked(index))
    }

    fn geometry_unchecked(self, index: usize) -> CandleGeometry {
        CandleGeometry {
            center_x: self.center_x(index),
            slot_width: self.slot_width,
            body_width: self.body_width,
        }
    }

    /// Finds the first candle whose body spans `x` (canvas-local pixels).
    ///
    /// Only the slot under `x` and its two neighbours can match, so the scan
    /// is constant time while still returning the lowest matching index.
    #[must_use]
    pub fn index_at_x(self, x: f64) -> CandleHit {
        if !x.is_finite() {
            return CandleHit::NotFound;
        }

        let slot = (x / self.slot_width).floor() as i64;
        for candidate in slot.saturating_sub(1)..=slot.saturating_add(1) {
            let Ok(index) = usize::try_from(candidate) else {
                continue;
            };
            if index >= self.count {
                break;
            }
            if self.geometry_unchecked(index).contains_x(x) {
                return CandleHit::Found(index);
            }
        }
        CandleHit::NotFound
    }

    /// Projects every slot into deterministic geometry.
    #[must_use]
    pub fn project(self) -> Vec<CandleGeometry> {
        // Optional parallel projection keeps output identical for large series.
        #[cfg(feature = "parallel-projection")]
        {
            (0..self.count)
                .into_par_iter()
                .map(|index| self.geometry_unchecked(index))
                .collect()
        }

        #[cfg(not(feature = "parallel-projection"))]
        {
            (0..self.count)
                .map(|index| self.geometry_unchecked(index))
                .collect()
        }
    }
}
