mod data_controller;
mod engine;
mod engine_config;
mod frame_builder;
mod host;
mod interaction_coordinator;
mod invalidation;
mod loader;
mod snapshot;
mod source;

pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, ChartStyle};
pub use frame_builder::{build_candle_frame, build_status_frame};
pub use host::{ChartMount, FrameHost, FrameRequestId, PointerListenerId};
pub use invalidation::{InvalidationTopic, InvalidationTopics};
pub use loader::{CandleLoader, LoadState, LoadStatus};
pub use snapshot::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1};
#[cfg(feature = "http-source")]
pub use source::HttpCandleSource;
pub use source::{CandleSource, MemoryCandleSource, SourceResponse, candle_path, validate_symbol};
