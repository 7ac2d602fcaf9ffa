use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Backing-store canvas size in device pixels.
///
/// All geometry is computed in these pixels. The logical (CSS) size the
/// canvas is displayed at is `width / device_pixel_ratio` by
/// `height / device_pixel_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

/// Rounded backing-store length of a logical length; errors past `u32::MAX`.
fn backing_len(logical: f64, device_pixel_ratio: f64) -> ChartResult<u32> {
    let scaled = (logical * device_pixel_ratio).round();
    if scaled > f64::from(u32::MAX) {
        return Err(ChartError::InvalidData(format!(
            "backing-store size {scaled} exceeds {}",
            u32::MAX
        )));
    }
    Ok(scaled as u32)
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Builds a backing-store viewport from a logical size and a pixel ratio.
    pub fn from_logical(
        logical_width: f64,
        logical_height: f64,
        device_pixel_ratio: f64,
    ) -> ChartResult<Self> {
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        if !logical_width.is_finite()
            || !logical_height.is_finite()
            || logical_width < 0.0
            || logical_height < 0.0
        {
            return Err(ChartError::InvalidData(
                "logical size must be finite and >= 0".to_owned(),
            ));
        }

        Ok(Self {
            width: backing_len(logical_width, device_pixel_ratio)?,
            height: backing_len(logical_height, device_pixel_ratio)?,
            device_pixel_ratio,
        })
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, device_pixel_ratio: f64) -> Self {
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0
            && self.height > 0
            && self.device_pixel_ratio.is_finite()
            && self.device_pixel_ratio > 0.0
    }

    /// Display size in logical pixels.
    #[must_use]
    pub fn logical_size(self) -> (f64, f64) {
        (
            f64::from(self.width) / self.device_pixel_ratio,
            f64::from(self.height) / self.device_pixel_ratio,
        )
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }

    /// Converts a pointer X relative to the page viewport into canvas-local
    /// backing-store pixels.
    #[must_use]
    pub fn client_x_to_canvas(self, client_x: f64, canvas_left: f64) -> f64 {
        (client_x - canvas_left) * self.device_pixel_ratio
    }
}
