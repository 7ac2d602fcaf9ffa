use approx::assert_abs_diff_eq;
use candle_canvas::api::{
    ChartEngine, ChartEngineConfig, ChartStyle, ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot,
};
use candle_canvas::core::{Candle, DecoderOptions, PriceRange, Viewport};
use candle_canvas::render::{Color, NullRenderer};

fn sample_engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(1000, 540));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_candles(vec![
        Candle::new(10.0, 12.0, 8.0, 11.0).expect("valid candle"),
        Candle::filler(11.0),
        Candle::new(11.0, 14.0, 10.0, 13.0).expect("valid candle"),
        Candle::new(13.0, 13.5, 9.0, 9.5).expect("valid candle"),
    ]);
    engine
}

#[test]
fn config_json_round_trip_preserves_style_and_decoder() {
    let style = ChartStyle {
        bearish_color: Color::rgb(0.8, 0.1, 0.1),
        body_width_ratio: 0.6,
        ..ChartStyle::default()
    };
    let config = ChartEngineConfig::new(Viewport::new(640, 480).with_device_pixel_ratio(2.0))
        .with_style(style)
        .with_decoder_options(DecoderOptions { strict_ohlc: true });

    let json = config.to_json_pretty().expect("serialize config");
    let parsed = ChartEngineConfig::from_json_str(&json).expect("parse config");
    assert_eq!(parsed, config);
}

#[test]
fn partial_config_json_falls_back_to_defaults() {
    let parsed = ChartEngineConfig::from_json_str(
        r#"{"viewport":{"width":800,"height":600},"style":{"wick_width_px":2.0}}"#,
    )
    .expect("parse partial config");

    assert_eq!(parsed.viewport, Viewport::new(800, 600));
    assert_eq!(parsed.style.wick_width_px, 2.0);
    assert_eq!(parsed.style.bullish_color, ChartStyle::default().bullish_color);
    assert_eq!(parsed.style.body_width_ratio, 0.8);
    assert_eq!(parsed.decoder, DecoderOptions::default());
}

#[test]
fn invalid_style_is_rejected() {
    let result = ChartEngineConfig::from_json_str(
        r#"{"viewport":{"width":800,"height":600},"style":{"body_width_ratio":1.5}}"#,
    );
    assert!(result.is_err());

    let config = ChartEngineConfig::new(Viewport::new(800, 600)).with_style(ChartStyle {
        wick_width_px: 0.0,
        ..ChartStyle::default()
    });
    assert!(ChartEngine::new(NullRenderer::default(), config).is_err());

    let mut engine = sample_engine();
    let bad_color = ChartStyle {
        neutral_color: Color::rgb(2.0, 0.0, 0.0),
        ..ChartStyle::default()
    };
    assert!(engine.set_style(bad_color).is_err());
    assert_eq!(engine.style(), ChartStyle::default());
}

#[test]
fn snapshot_reports_selection_and_geometry() {
    let mut engine = sample_engine();
    engine.set_selected_index(Some(2)).expect("select");

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.candle_count, 4);
    assert_eq!(snapshot.price_range, Some(PriceRange { min: 8.0, max: 14.0 }));
    assert_eq!(snapshot.selected_index, Some(2));
    assert_eq!(snapshot.selected_candle.map(|c| c.close), Some(13.0));
    assert_eq!(snapshot.status_message, None);

    let centers: Vec<f64> = snapshot.geometry.iter().map(|g| g.center_x).collect();
    assert_eq!(centers, vec![125.0, 375.0, 625.0, 875.0]);
}

#[test]
fn snapshot_contract_round_trip() {
    let mut engine = sample_engine();
    engine.pointer_move(375.0);
    let snapshot = engine.snapshot();

    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {ENGINE_SNAPSHOT_JSON_SCHEMA_V1}")));

    let parsed = EngineSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed.viewport, snapshot.viewport);
    assert_eq!(parsed.candle_count, snapshot.candle_count);
    assert_eq!(parsed.price_range, snapshot.price_range);
    assert_eq!(parsed.selected_index, Some(1));
    assert_eq!(parsed.selected_candle, Some(Candle::filler(11.0)));
    assert_eq!(parsed.geometry.len(), snapshot.geometry.len());
    for (a, b) in parsed.geometry.iter().zip(&snapshot.geometry) {
        assert_abs_diff_eq!(a.center_x, b.center_x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.body_width, b.body_width, epsilon = 1e-9);
    }
}

#[test]
fn bare_snapshot_json_is_accepted_and_bad_versions_are_not() {
    let snapshot = sample_engine().snapshot();
    let bare = serde_json::to_string(&snapshot).expect("serialize bare");
    let parsed = EngineSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed.candle_count, 4);

    let future = snapshot
        .to_json_contract_v1_pretty()
        .expect("serialize")
        .replace(
            &format!("\"schema_version\": {ENGINE_SNAPSHOT_JSON_SCHEMA_V1}"),
            "\"schema_version\": 99",
        );
    assert!(EngineSnapshot::from_json_compat_str(&future).is_err());
    assert!(EngineSnapshot::from_json_compat_str("not json").is_err());
}

#[test]
fn status_snapshot_has_no_geometry() {
    let mut engine = sample_engine();
    engine.show_status("Loading...");

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.candle_count, 0);
    assert_eq!(snapshot.price_range, None);
    assert!(snapshot.geometry.is_empty());
    assert_eq!(snapshot.status_message.as_deref(), Some("Loading..."));
}
