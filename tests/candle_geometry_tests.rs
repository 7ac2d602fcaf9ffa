use approx::assert_abs_diff_eq;
use candle_canvas::api::{ChartEngine, ChartEngineConfig};
use candle_canvas::core::{
    Candle, CandleHit, CandleSlots, DEFAULT_BODY_WIDTH_RATIO, PriceRange, PriceScale, Viewport,
};
use candle_canvas::render::NullRenderer;

fn sample_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let open = 100.0 + i as f64;
            let close = if i % 2 == 0 { open + 2.0 } else { open - 2.0 };
            Candle::new(open, open.max(close) + 1.0, open.min(close) - 1.0, close)
                .expect("valid candle")
        })
        .collect()
}

#[test]
fn slots_are_evenly_spaced_with_eighty_percent_bodies() {
    let slots = CandleSlots::new(7, 1000.0, DEFAULT_BODY_WIDTH_RATIO).expect("slots");
    let slot_width = 1000.0 / 7.0;

    assert_abs_diff_eq!(slots.slot_width(), slot_width, epsilon = 1e-9);
    assert_abs_diff_eq!(slots.body_width(), 0.8 * slot_width, epsilon = 1e-9);
    assert_abs_diff_eq!(slots.center_x(0), slot_width / 2.0, epsilon = 1e-9);
    for i in 0..6 {
        assert_abs_diff_eq!(
            slots.center_x(i + 1) - slots.center_x(i),
            slot_width,
            epsilon = 1e-9
        );
    }
}

#[test]
fn projected_geometry_matches_slots() {
    let slots = CandleSlots::new(4, 1000.0, DEFAULT_BODY_WIDTH_RATIO).expect("slots");
    let geometry = slots.project();

    assert_eq!(geometry.len(), 4);
    let centers: Vec<f64> = geometry.iter().map(|g| g.center_x).collect();
    assert_eq!(centers, vec![125.0, 375.0, 625.0, 875.0]);
    assert!(geometry.iter().all(|g| g.slot_width == 250.0));
    assert_abs_diff_eq!(geometry[0].body_left(), 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry[0].body_right(), 225.0, epsilon = 1e-9);
}

#[test]
fn hit_test_finds_every_center_including_index_zero() {
    let slots = CandleSlots::new(13, 777.0, DEFAULT_BODY_WIDTH_RATIO).expect("slots");
    for i in 0..13 {
        assert_eq!(slots.index_at_x(slots.center_x(i)), CandleHit::Found(i));
    }
    assert_eq!(slots.index_at_x(slots.center_x(0)).index(), Some(0));
}

#[test]
fn hit_test_outside_outer_bodies_is_not_found() {
    let slots = CandleSlots::new(4, 1000.0, DEFAULT_BODY_WIDTH_RATIO).expect("slots");
    let first_left = slots.center_x(0) - slots.body_width() / 2.0;
    let last_right = slots.center_x(3) + slots.body_width() / 2.0;

    assert_eq!(slots.index_at_x(first_left), CandleHit::Found(0));
    assert_eq!(slots.index_at_x(last_right), CandleHit::Found(3));
    assert_eq!(slots.index_at_x(first_left - 0.5), CandleHit::NotFound);
    assert_eq!(slots.index_at_x(last_right + 0.5), CandleHit::NotFound);
    assert_eq!(slots.index_at_x(-50.0), CandleHit::NotFound);
    assert_eq!(slots.index_at_x(5_000.0), CandleHit::NotFound);
    assert_eq!(slots.index_at_x(-50.0).index(), None);
}

#[test]
fn price_transform_hits_padding_edges_and_is_decreasing() {
    let scale = PriceScale::new(PriceRange { min: 8.0, max: 12.0 }, 540.0, 20.0);

    assert_abs_diff_eq!(scale.price_to_pixel(12.0), 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.price_to_pixel(8.0), 520.0, epsilon = 1e-9);

    let mut previous = f64::INFINITY;
    for step in 0..=40 {
        let price = 8.0 + f64::from(step) * 0.1;
        let y = scale.price_to_pixel(price);
        assert!(y < previous, "y must decrease as price rises");
        previous = y;
    }
}

#[test]
fn flat_series_maps_to_finite_centre() {
    let candles = vec![Candle::filler(11.0); 5];
    let range = PriceRange::from_candles(&candles).expect("range");
    assert!(range.is_flat());

    let scale = PriceScale::new(range, 540.0, 20.0);
    let y = scale.price_to_pixel(11.0);
    assert!(y.is_finite());
    assert_abs_diff_eq!(y, 270.0, epsilon = 1e-9);
    assert!(scale.pixel_to_price(100.0).is_finite());
}

#[test]
fn engine_hit_test_matches_slot_layout() {
    let config = ChartEngineConfig::new(Viewport::new(1000, 540));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    assert_eq!(engine.index_at_x(10.0), CandleHit::NotFound);

    engine.set_candles(sample_candles(4));
    let slots = engine.slots().expect("slots");
    for i in 0..4 {
        assert_eq!(engine.index_at_x(slots.center_x(i)), CandleHit::Found(i));
    }
    assert_eq!(engine.index_at_x(0.0), CandleHit::NotFound);
}

#[test]
fn engine_price_mapping_uses_candle_extent() {
    let config = ChartEngineConfig::new(Viewport::new(1000, 540));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    assert!(engine.map_price_to_pixel(10.0).is_none());

    engine.set_candles(vec![
        Candle::new(100.0, 110.0, 90.0, 105.0).expect("valid candle"),
        Candle::new(105.0, 120.0, 95.0, 98.0).expect("valid candle"),
    ]);

    assert_eq!(
        engine.price_range(),
        Some(PriceRange {
            min: 90.0,
            max: 120.0
        })
    );
    let top = engine.map_price_to_pixel(120.0).expect("mapped");
    let bottom = engine.map_price_to_pixel(90.0).expect("mapped");
    assert_abs_diff_eq!(top, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bottom, 520.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        engine.map_pixel_to_price(270.0).expect("inverse"),
        105.0,
        epsilon = 1e-9
    );
}

#[test]
fn extreme_finite_prices_render_without_error() {
    let config = ChartEngineConfig::new(Viewport::new(1000, 540));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_candles(vec![
        Candle::new(0.0, 1e308, -1e308, 0.0).expect("valid candle"),
        Candle::filler(0.0),
    ]);

    let bottom = engine.map_price_to_pixel(-1e308).expect("mapped");
    assert_abs_diff_eq!(bottom, 520.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        engine.map_price_to_pixel(1e308).expect("mapped"),
        20.0,
        epsilon = 1e-9
    );

    engine.render().expect("extreme range renders");
    assert_eq!(engine.renderer().last_stroke_count, 3);
}

#[test]
fn pointer_move_without_drawn_chart_clears_selection() {
    let config = ChartEngineConfig::new(Viewport::new(1000, 540));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_candles(sample_candles(4));
    assert_eq!(engine.pointer_move(375.0), CandleHit::Found(1));
    engine.render().expect("render");

    engine.set_viewport(Viewport::new(0, 0));
    engine.render().expect("zero-area render");
    assert_eq!(engine.pointer_move(375.0), CandleHit::NotFound);
    assert_eq!(engine.selected_index(), None);
    assert_eq!(engine.selected_candle(), None);
    assert!(engine.has_pending_invalidation());
}
