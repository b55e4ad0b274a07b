use strategy_curves::api::{
    CompoundPalette, CurveSceneBuilder, CurveSceneState, SceneInputs, SceneStyle,
    build_render_frame, lap_gridline_laps,
};
use strategy_curves::core::{Compound, DomainSource, PitWindow, Strategy, ViewportSize};
use strategy_curves::render::Color;

fn two_stop() -> Strategy {
    Strategy {
        strategy_id: Some("s-1".to_owned()),
        kind: "two-stop".to_owned(),
        expected_time: 5400.0,
        variance: 2.5,
        stint_lengths: vec![20, 20, 20],
        compounds: vec![Compound::Soft, Compound::Medium, Compound::Hard],
        stop_laps: vec![20, 40],
        pit_windows: vec![PitWindow::new(18, 22), PitWindow::new(38, 42)],
        ..Strategy::default()
    }
}

fn inputs<'a>(
    strategy: &'a Strategy,
    palette: &'a CompoundPalette,
    viewport: ViewportSize,
) -> SceneInputs<'a> {
    SceneInputs {
        strategy,
        total_laps: 60,
        domain_source: DomainSource::provided(90.0, 95.0),
        viewport,
        palette,
        selected: false,
        pointer_x: None,
    }
}

#[test]
fn ready_scene_draws_one_path_per_stint() {
    let strategy = two_stop();
    let palette = CompoundPalette::default();
    let state = CurveSceneBuilder::default().build(inputs(
        &strategy,
        &palette,
        ViewportSize::new(656, 236),
    ));
    let scene = state.as_ready().expect("ready scene");

    assert_eq!(scene.stints.len(), 3);
    assert!(scene.stints.iter().all(|stint| stint.points.len() == 20));
    assert_eq!(scene.stints[0].color, Color::rgb8(0xff, 0x4b, 0x4b));
    assert_eq!(scene.stints[2].color, Color::rgb8(0xb8, 0xbe, 0xc6));
    assert_eq!(scene.samples.len(), 60);
    assert_eq!(scene.pit_windows.len(), 2);
    assert!(scene.hover.is_none());

    // Stint boundaries never share a point.
    let end_of_first = scene.stints[0].points.last().expect("point");
    let start_of_second = scene.stints[1].points.first().expect("point");
    assert!(start_of_second.0 > end_of_first.0);
}

#[test]
fn scene_header_and_axes_use_display_formats() {
    let strategy = two_stop();
    let palette = CompoundPalette::default();
    let state = CurveSceneBuilder::default().build(inputs(
        &strategy,
        &palette,
        ViewportSize::new(656, 236),
    ));
    let scene = state.as_ready().expect("ready scene");

    assert_eq!(scene.header.kind, "two-stop");
    assert_eq!(scene.header.expected_time, "1:30:00");
    assert_eq!(scene.header.variance, "var 2.5");
    assert_eq!(scene.header.stop_count, 2);

    let labels: Vec<&str> = scene.y_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["90.0", "92.5", "95.0"]);
    assert!((scene.y_ticks[0].y - 214.0).abs() <= 1e-9);
    assert!((scene.y_ticks[2].y - 14.0).abs() <= 1e-9);

    let laps: Vec<u32> = scene.lap_gridlines.iter().map(|g| g.lap).collect();
    assert_eq!(laps, vec![1, 19, 39, 60]);

    let legend: Vec<&str> = scene.legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(legend, vec!["SOFT", "MEDIUM", "HARD", "Pit window"]);
}

#[test]
fn identical_inputs_build_identical_scenes() {
    let strategy = two_stop();
    let palette = CompoundPalette::default();
    let builder = CurveSceneBuilder::default();
    let mut first_inputs = inputs(&strategy, &palette, ViewportSize::new(640, 300));
    first_inputs.pointer_x = Some(250.0);

    assert_eq!(builder.build(first_inputs), builder.build(first_inputs));
}

#[test]
fn small_viewport_shows_loading_placeholder() {
    let strategy = two_stop();
    let palette = CompoundPalette::default();
    let builder = CurveSceneBuilder::default();

    for viewport in [
        ViewportSize::new(0, 0),
        ViewportSize::new(49, 300),
        ViewportSize::new(300, 49),
    ] {
        assert_eq!(
            builder.build(inputs(&strategy, &palette, viewport)),
            CurveSceneState::Loading
        );
    }
}

#[test]
fn strategy_without_samples_shows_no_data() {
    let strategy = Strategy::default();
    let palette = CompoundPalette::default();
    let builder = CurveSceneBuilder::default();

    assert_eq!(
        builder.build(inputs(&strategy, &palette, ViewportSize::new(656, 236))),
        CurveSceneState::NoData
    );
    // An empty strategy reports no data even before layout.
    assert_eq!(
        builder.build(inputs(&strategy, &palette, ViewportSize::new(0, 0))),
        CurveSceneState::NoData
    );
}

#[test]
fn pointer_builds_hover_marker_with_tooltip() {
    let strategy = two_stop();
    let palette = CompoundPalette::default();
    let builder = CurveSceneBuilder::default();
    let viewport = ViewportSize::new(656, 236);

    let plain = builder.build(inputs(&strategy, &palette, viewport));
    let lap_19_x = plain.as_ready().expect("ready").samples[18].x;

    let mut hovered = inputs(&strategy, &palette, viewport);
    hovered.pointer_x = Some(lap_19_x + 1.0);
    let state = builder.build(hovered);
    let marker = state
        .as_ready()
        .and_then(|scene| scene.hover.as_ref())
        .expect("hover marker");

    assert_eq!(marker.readout.lap, 19);
    assert_eq!(
        marker.tooltip.lines,
        vec![
            "Lap 19".to_owned(),
            "SOFT".to_owned(),
            "90.900s".to_owned(),
            "Tyre 5.3%".to_owned(),
            "Pit window: 18-22".to_owned(),
        ]
    );
    assert!((marker.tooltip.anchor_x_pct - lap_19_x / 656.0 * 100.0).abs() <= 1e-9);
}

#[test]
fn render_frame_paints_bands_grid_paths_and_captions() {
    let strategy = two_stop();
    let palette = CompoundPalette::default();
    let state = CurveSceneBuilder::default().build(inputs(
        &strategy,
        &palette,
        ViewportSize::new(656, 236),
    ));
    let frame = build_render_frame(state.as_ready().expect("ready"), &SceneStyle::default());

    frame.validate().expect("valid frame");
    assert_eq!(frame.rects.len(), 2);
    assert_eq!(frame.polylines.len(), 3);
    // Three value gridlines, four lap gridlines, two axes.
    assert_eq!(frame.lines.len(), 9);
    assert_eq!(frame.texts.len(), 5);
    assert!(frame.circles.is_empty());
}

#[test]
fn gridline_laps_are_deduplicated_for_short_races() {
    let fractions = [0.33, 0.66];
    assert_eq!(lap_gridline_laps(60, &fractions).as_slice(), &[1, 19, 39, 60]);
    assert_eq!(lap_gridline_laps(3, &fractions).as_slice(), &[1, 3]);
    assert_eq!(lap_gridline_laps(1, &fractions).as_slice(), &[1]);
}
