use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("gap at position {position} has no previous candle to fill from")]
    EmptyHistory { position: usize },

    #[error("ohlc block at position {position} needs 4 values but only {available} remain")]
    TruncatedSeries { position: usize, available: usize },

    #[error("ohlc block at position {position} contains a gap in its value slots")]
    MalformedBlock { position: usize },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("Network response was not ok ({status})")]
    Retrieval { symbol: String, status: u16 },

    #[error("transport failure: {0}")]
    Transport(String),
}

impl ChartError {
    /// Returns `true` for failures produced while turning a raw series into candles.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyHistory { .. }
                | Self::TruncatedSeries { .. }
                | Self::MalformedBlock { .. }
                | Self::InvalidData(_)
        )
    }

    /// Short message shown in place of the chart when a load attempt fails.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Retrieval { .. } => self.to_string(),
            Self::Transport(_) => "Error fetching data".to_owned(),
            other if other.is_decode_error() => format!("Could not decode candles: {other}"),
            other => other.to_string(),
        }
    }
}
