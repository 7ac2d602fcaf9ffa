//! candle-canvas: gap-encoded OHLC decoding and a candlestick canvas engine.
//!
//! A raw `number | null` series is decoded into candles by
//! [`core::SeriesDecoder`]; [`ChartEngine`] lays them out on a pixel canvas,
//! hands draw commands to a [`render::Renderer`] and maps pointer positions
//! back to candle indices.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
