pub mod candle;
pub mod decoder;
pub mod geometry;
pub mod price_scale;
pub mod types;

pub use candle::Candle;
pub use decoder::{
    BLOCK_STRIDE, DecoderOptions, OHLC_FIELDS, SeriesDecoder, decode_series, parse_raw_series,
};
pub use geometry::{CandleGeometry, CandleHit, CandleSlots, DEFAULT_BODY_WIDTH_RATIO};
pub use price_scale::{DEFAULT_VERTICAL_PADDING_PX, PriceRange, PriceScale};
pub use types::Viewport;
