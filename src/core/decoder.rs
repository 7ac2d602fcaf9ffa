use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Candle;
use crate::error::{ChartError, ChartResult};

/// Number of value slots read for one candle (`open, high, low, close`).
pub const OHLC_FIELDS: usize = 4;

/// Slots consumed by one price block: the four values plus one trailing
/// time-gap slot whose content is ignored.
pub const BLOCK_STRIDE: usize = OHLC_FIELDS + 1;

/// Decoder tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecoderOptions {
    /// Reject blocks whose open/close fall outside `[low, high]` instead of
    /// keeping them with a warning.
    #[serde(default)]
    pub strict_ohlc: bool,
}

/// Turns a gap-encoded nullable series into candles.
///
/// Encoding:
/// - leading gaps are dropped (there is no close to fill them from)
/// - a value starts a block: the next four slots are `open, high, low, close`
///   and the block advances the cursor by [`BLOCK_STRIDE`]
/// - a gap outside a block becomes a flat filler candle at the previous close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesDecoder {
    options: DecoderOptions,
}

impl SeriesDecoder {
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(self) -> DecoderOptions {
        self.options
    }

    pub fn decode(self, raw: &[Option<f64>]) -> ChartResult<Vec<Candle>> {
        let Some(start) = raw.iter().position(Option::is_some) else {
            debug!(raw_len = raw.len(), "series has no values");
            return Ok(Vec::new());
        };
        let series = &raw[start..];

        let mut candles = Vec::with_capacity(series.len() / BLOCK_STRIDE + 1);
        let mut fillers = 0usize;
        let mut cursor = 0usize;
        while cursor < series.len() {
            let position = start + cursor;
            if series[cursor].is_some() {
                let candle = self.read_block(&series[cursor..], position, candles.is_empty())?;
                candles.push(candle);
                cursor += BLOCK_STRIDE;
            } else {
                let previous = candles
                    .last()
                    .ok_or(ChartError::EmptyHistory { position })?;
                candles.push(Candle::filler(previous.close));
                fillers += 1;
                cursor += 1;
            }
        }

        debug!(
            raw_len = raw.len(),
            leading_gaps = start,
            candle_count = candles.len(),
            fillers,
            "decoded series"
        );
        Ok(candles)
    }

    /// Parses a JSON array of `number | null` and decodes it.
    pub fn decode_json(self, input: &str) -> ChartResult<Vec<Candle>> {
        self.decode(&parse_raw_series(input)?)
    }

    fn read_block(
        self,
        block: &[Option<f64>],
        position: usize,
        is_first: bool,
    ) -> ChartResult<Candle> {
        let Some(slots) = block.get(..OHLC_FIELDS) else {
            return Err(ChartError::TruncatedSeries {
                position,
                available: block.len(),
            });
        };

        let mut values = [0.0; OHLC_FIELDS];
        for (offset, (value, slot)) in values.iter_mut().zip(slots).enumerate() {
            *value = match slot {
                Some(v) => *v,
                None if is_first => {
                    return Err(ChartError::EmptyHistory {
                        position: position + offset,
                    });
                }
                None => return Err(ChartError::MalformedBlock { position }),
            };
        }

        let [open, high, low, close] = values;
        let candle = Candle::from_raw(open, high, low, close)?;
        if !candle.has_consistent_range() {
            if self.options.strict_ohlc {
                return Err(ChartError::InvalidData(format!(
                    "ohlc block at position {position} has open/close outside low/high"
                )));
            }
            warn!(position, ?candle, "keeping ohlc block with inconsistent range");
        }
        Ok(candle)
    }
}

/// Parses a JSON array of `number | null`.
pub fn parse_raw_series(input: &str) -> ChartResult<Vec<Option<f64>>> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse series json: {e}")))
}

/// Decodes `raw` with default options.
pub fn decode_series(raw: &[Option<f64>]) -> ChartResult<Vec<Candle>> {
    SeriesDecoder::default().decode(raw)
}
