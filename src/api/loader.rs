use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Candle, SeriesDecoder};
use crate::error::ChartResult;

use super::ChartEngineConfig;
use super::source::CandleSource;

/// Coarse load status shown to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Outcome of the most recent load request.
///
/// Only `Success` carries candles. A new load replaces the whole state, so a
/// reader sees either the old list or the new one.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading { symbol: String },
    Success { symbol: String, candles: Arc<[Candle]> },
    Error { symbol: String, message: String },
}

impl LoadState {
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        match self {
            Self::Idle => LoadStatus::Idle,
            Self::Loading { .. } => LoadStatus::Loading,
            Self::Success { .. } => LoadStatus::Success,
            Self::Error { .. } => LoadStatus::Error,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Loading { symbol } | Self::Success { symbol, .. } | Self::Error { symbol, .. } => {
                Some(symbol.as_str())
            }
        }
    }

    #[must_use]
    pub fn candles(&self) -> Option<&Arc<[Candle]>> {
        match self {
            Self::Success { candles, .. } => Some(candles),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Text shown in place of the chart, `None` when there is a chart to draw.
    #[must_use]
    pub fn status_message(&self) -> Option<String> {
        match self {
            Self::Idle => Some("No asset selected".to_owned()),
            Self::Loading { .. } => Some("Loading...".to_owned()),
            Self::Error { message, .. } => Some(format!("Error: {message}")),
            Self::Success { .. } => None,
        }
    }
}

/// Drives `Idle -> Loading -> {Success, Error}` for one chart.
///
/// `load` fetches inline. Hosts that fetch elsewhere call `begin`, run the
/// fetch, then hand the result to `complete`; a result for a symbol that is no
/// longer pending is dropped.
#[derive(Debug)]
pub struct CandleLoader<S: CandleSource> {
    source: S,
    decoder: SeriesDecoder,
    state: LoadState,
}

impl<S: CandleSource> CandleLoader<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            decoder: SeriesDecoder::default(),
            state: LoadState::Idle,
        }
    }

    /// Loader decoding with the options of `config`, so a chart and its
    /// loader share one setup.
    #[must_use]
    pub fn from_config(source: S, config: &ChartEngineConfig) -> Self {
        Self::new(source).with_decoder(SeriesDecoder::new(config.decoder))
    }

    #[must_use]
    pub fn with_decoder(mut self, decoder: SeriesDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.state.status()
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Starts a load for `symbol`, or goes idle when no symbol is selected.
    pub fn begin(&mut self, symbol: Option<&str>) -> &LoadState {
        self.state = match symbol {
            Some(symbol) => LoadState::Loading {
                symbol: symbol.to_owned(),
            },
            None => LoadState::Idle,
        };
        debug!(status = ?self.state.status(), symbol = ?self.state.symbol(), "load begin");
        &self.state
    }

    /// Applies a fetch result. Returns `false` when `symbol` is not the pending load.
    pub fn complete(&mut self, symbol: &str, fetched: ChartResult<Vec<Option<f64>>>) -> bool {
        let pending = matches!(&self.state, LoadState::Loading { symbol: current } if current == symbol);
        if !pending {
            debug!(symbol, "dropping stale load result");
            return false;
        }

        let decoded = fetched.and_then(|raw| self.decoder.decode(&raw));
        self.state = match decoded {
            Ok(candles) => {
                debug!(symbol, candle_count = candles.len(), "load succeeded");
                LoadState::Success {
                    symbol: symbol.to_owned(),
                    candles: Arc::from(candles),
                }
            }
            Err(err) => {
                warn!(symbol, error = %err, "load failed");
                LoadState::Error {
                    symbol: symbol.to_owned(),
                    message: err.user_message(),
                }
            }
        };
        true
    }

    /// Fetches and decodes `symbol` in one step.
    pub fn load(&mut self, symbol: Option<&str>) -> &LoadState {
        self.begin(symbol);
        if let Some(symbol) = symbol {
            let fetched = self.source.fetch(symbol);
            self.complete(symbol, fetched);
        }
        &self.state
    }
}
