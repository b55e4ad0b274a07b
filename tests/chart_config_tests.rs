use strategy_curves::core::Padding;
use strategy_curves::{CurveChartConfig, CurveError};

#[test]
fn defaults_match_dashboard_layout() {
    let config = CurveChartConfig::default();

    assert_eq!(config.padding, Padding::new(14.0, 14.0, 22.0, 42.0));
    assert_eq!(config.min_usable_size_px, 50);
    assert_eq!(config.max_retry_frames, 240);
    assert_eq!(config.axis_tick_count, 3);
    assert_eq!(config.lap_gridline_fractions, vec![0.33, 0.66]);
    assert!((config.synthesis.fallback_baseline_s - 92.0).abs() <= 1e-9);
    assert!((config.pit_window_min_width_px - 2.0).abs() <= 1e-9);
    config.validate().expect("defaults are valid");
}

#[test]
fn partial_json_fills_remaining_defaults() {
    let config = CurveChartConfig::from_json_str(
        r#"{"min_usable_size_px": 80, "padding": {"left": 60.0}, "synthesis": {"fallback_baseline_s": 88.5}}"#,
    )
    .expect("valid config");

    assert_eq!(config.min_usable_size_px, 80);
    assert!((config.padding.left - 60.0).abs() <= 1e-9);
    assert!((config.padding.top - 14.0).abs() <= 1e-9);
    assert!((config.synthesis.fallback_baseline_s - 88.5).abs() <= 1e-9);
    assert!((config.synthesis.degradation_step_s - 0.05).abs() <= 1e-9);
    assert_eq!(config.size_tracker_config().min_usable_size_px, 80);
}

#[test]
fn json_round_trip_preserves_config() {
    let config = CurveChartConfig::default()
        .with_fallback_baseline_s(95.0)
        .with_pit_window_min_width_px(3.0);
    let json = config.to_json_pretty().expect("serialize");
    let back = CurveChartConfig::from_json_str(&json).expect("reparse");
    assert_eq!(back, config);
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        r#"{"axis_tick_count": 1}"#,
        r#"{"lap_gridline_fractions": [0.5, 1.2]}"#,
        r#"{"padding": {"top": -1.0}}"#,
        r#"{"max_retry_frames": 0}"#,
        r#"{"hover_marker_radius_px": 0.0}"#,
        r#"{"synthesis": {"fallback_baseline_s": 0.0}}"#,
    ];
    for case in cases {
        let err = CurveChartConfig::from_json_str(case).expect_err(case);
        assert!(matches!(err, CurveError::InvalidConfig(_)), "{case}: {err}");
    }
}

#[test]
fn inverted_fallback_domain_fails_to_parse() {
    let err = CurveChartConfig::from_json_str(r#"{"domain": {"fallback": {"min": 95.0, "max": 90.0}}}"#)
        .expect_err("inverted fallback");
    assert!(matches!(err, CurveError::Parse(_)));
}
