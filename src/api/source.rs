use indexmap::IndexMap;
use tracing::debug;

use crate::core::decoder::parse_raw_series;
use crate::error::{ChartError, ChartResult};

/// Provider of raw gap-encoded series for a symbol.
///
/// Non-success responses map to [`ChartError::Retrieval`] carrying the
/// status code; failures to reach the provider map to
/// [`ChartError::Transport`].
pub trait CandleSource {
    fn fetch(&self, symbol: &str) -> ChartResult<Vec<Option<f64>>>;
}

/// Resource path of a symbol's series, relative to the data root.
#[must_use]
pub fn candle_path(symbol: &str) -> String {
    format!("candles/{symbol}.json")
}

/// Rejects symbols that would escape the `candles/` directory.
pub fn validate_symbol(symbol: &str) -> ChartResult<()> {
    if symbol.is_empty()
        || symbol.contains('/')
        || symbol.contains('\\')
        || symbol.contains("..")
    {
        return Err(ChartError::InvalidData(format!(
            "invalid symbol identifier `{symbol}`"
        )));
    }
    Ok(())
}

/// Canned response served by [`MemoryCandleSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResponse {
    pub status: u16,
    pub body: String,
}

/// In-memory source keyed by resource path.
///
/// Unknown paths answer `404`.
#[derive(Debug, Clone, Default)]
pub struct MemoryCandleSource {
    responses: IndexMap<String, SourceResponse>,
}

impl MemoryCandleSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_response(mut self, symbol: &str, status: u16, body: impl Into<String>) -> Self {
        self.insert(symbol, status, body);
        self
    }

    pub fn insert(&mut self, symbol: &str, status: u16, body: impl Into<String>) {
        self.responses.insert(
            candle_path(symbol),
            SourceResponse {
                status,
                body: body.into(),
            },
        );
    }

    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.responses.keys().map(String::as_str).collect()
    }
}

impl CandleSource for MemoryCandleSource {
    fn fetch(&self, symbol: &str) -> ChartResult<Vec<Option<f64>>> {
        validate_symbol(symbol)?;
        let path = candle_path(symbol);
        let Some(response) = self.responses.get(&path) else {
            debug!(%path, "no canned response");
            return Err(ChartError::Retrieval {
                symbol: symbol.to_owned(),
                status: 404,
            });
        };

        if !(200..300).contains(&response.status) {
            return Err(ChartError::Retrieval {
                symbol: symbol.to_owned(),
                status: response.status,
            });
        }
        parse_raw_series(&response.body)
    }
}

#[cfg(feature = "http-source")]
pub use http::HttpCandleSource;

#[cfg(feature = "http-source")]
mod http {
    use std::time::Duration;

    use tracing::debug;

    use super::{CandleSource, candle_path, validate_symbol};
    use crate::core::decoder::parse_raw_series;
    use crate::error::{ChartError, ChartResult};

    /// Blocking HTTP source fetching `<base_url>/candles/<symbol>.json`.
    #[derive(Debug, Clone)]
    pub struct HttpCandleSource {
        base_url: String,
        client: reqwest::blocking::Client,
    }

    impl HttpCandleSource {
        pub fn new(base_url: impl Into<String>) -> ChartResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(12))
                .build()
                .map_err(|e| ChartError::Transport(format!("reqwest client error: {e}")))?;
            Ok(Self {
                base_url: base_url.into(),
                client,
            })
        }

        #[must_use]
        pub fn url_for(&self, symbol: &str) -> String {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                candle_path(symbol)
            )
        }
    }

    impl CandleSource for HttpCandleSource {
        fn fetch(&self, symbol: &str) -> ChartResult<Vec<Option<f64>>> {
            validate_symbol(symbol)?;
            let url = self.url_for(symbol);
            debug!(%url, "fetching series");

            let response = self
                .client
                .get(&url)
                .send()
                .map_err(|e| ChartError::Transport(format!("request to {url} failed: {e}")))?;
            let status = response.status();
            if !status.is_success() {
                return Err(ChartError::Retrieval {
                    symbol: symbol.to_owned(),
                    status: status.as_u16(),
                });
            }

            let body = response
                .text()
                .map_err(|e| ChartError::Transport(format!("failed to read body: {e}")))?;
            parse_raw_series(&body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CandleSource, MemoryCandleSource, candle_path};
    use crate::error::ChartError;

    #[test]
    fn path_follows_candles_directory_layout() {
        assert_eq!(candle_path("ABC"), "candles/ABC.json");
    }

    #[test]
    fn unknown_symbol_is_not_found() {
        let err = MemoryCandleSource::new()
            .fetch("XYZ")
            .expect_err("missing symbol");
        assert!(matches!(err, ChartError::Retrieval { status: 404, .. }));
    }

    #[test]
    fn traversal_symbol_is_rejected() {
        let source = MemoryCandleSource::new().with_response("ABC", 200, "[1]");
        assert!(matches!(
            source.fetch("../ABC"),
            Err(ChartError::InvalidData(_))
        ));
    }
}
