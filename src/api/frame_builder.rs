use crate::core::{Candle, CandleSlots, PriceRange, PriceScale, Viewport};
use crate::render::{CandleStroke, Color, RenderFrame, StatusLabel, StrokeKind};

use super::ChartStyle;

/// Builds the draw commands for one candle frame.
///
/// Pure function of its inputs: identical inputs give identical frames.
/// An empty list or a zero-area viewport yields an empty frame.
///
/// Per candle, in paint order:
/// - flat candles (`low == high`) get a single neutral mark at `y(open)` and nothing else
/// - the selected candle gets a full-height neutral guide beneath it
/// - a 1px wick from `y(high)` to `y(low)`, then a body from `y(open)` to `y(close)`,
///   bearish when `close < open` and bullish otherwise
#[must_use]
pub fn build_candle_frame(
    candles: &[Candle],
    viewport: Viewport,
    selected: Option<usize>,
    style: &ChartStyle,
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport);
    if !viewport.is_valid() {
        return frame;
    }
    let Some(slots) = CandleSlots::new(candles.len(), viewport.width_px(), style.body_width_ratio)
    else {
        return frame;
    };
    let Some(range) = PriceRange::from_candles(candles) else {
        return frame;
    };
    let scale = PriceScale::new(range, viewport.height_px(), style.vertical_padding_px);
    let body_width = slots.body_width();

    frame.strokes.reserve(candles.len() * 2 + 1);
    for (index, candle) in candles.iter().enumerate() {
        let x = slots.center_x(index);
        let y_open = scale.price_to_pixel(candle.open);
        let stroke =
            |kind: StrokeKind, y_from: f64, y_to: f64, width: f64, color: Color| CandleStroke {
                index,
                kind,
                x,
                y_from,
                y_to,
                width,
                color,
            };

        if candle.is_flat() {
            frame.strokes.push(stroke(
                StrokeKind::FlatMark,
                y_open,
                y_open + style.flat_mark_height_px,
                body_width,
                style.neutral_color,
            ));
            continue;
        }

        if selected == Some(index) {
            frame.strokes.push(stroke(
                StrokeKind::Guide,
                0.0,
                viewport.height_px(),
                body_width,
                style.neutral_color,
            ));
        }

        let color = if candle.is_bearish() {
            style.bearish_color
        } else {
            style.bullish_color
        };
        frame.strokes.push(stroke(
            StrokeKind::Wick,
            scale.price_to_pixel(candle.high),
            scale.price_to_pixel(candle.low),
            style.wick_width_px,
            color,
        ));
        frame.strokes.push(stroke(
            StrokeKind::Body,
            y_open,
            scale.price_to_pixel(candle.close),
            body_width,
            color,
        ));
    }

    frame
}

/// Frame shown instead of a chart while there is nothing to plot.
#[must_use]
pub fn build_status_frame(viewport: Viewport, message: &str, style: &ChartStyle) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport);
    if viewport.is_valid() && !message.is_empty() {
        frame.label = Some(StatusLabel {
            text: message.to_owned(),
            center_x: viewport.width_px() / 2.0,
            center_y: viewport.height_px() / 2.0,
            font_size_px: style.status_font_size_px * viewport.device_pixel_ratio,
            color: style.status_text_color,
        });
    }
    frame
}
