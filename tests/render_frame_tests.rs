use std::rc::Rc;

use strategy_curves::api::SceneStyle;
use strategy_curves::core::{Compound, DomainSource, PitWindow, StintCurve, Strategy, ViewportSize};
use strategy_curves::render::{
    CirclePrimitive, ClipRect, Color, LinePrimitive, NullRenderer, PolylinePrimitive, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};
use strategy_curves::{CurveChart, CurveChartConfig, CurveError};

fn hovered_chart() -> CurveChart<NullRenderer> {
    let strategy = Strategy {
        strategy_id: Some("s-9".to_owned()),
        kind: "one-stop".to_owned(),
        expected_time: 5460.0,
        stint_lengths: vec![30, 30],
        compounds: vec![Compound::Soft, Compound::Hard],
        stop_laps: vec![30],
        pit_windows: vec![PitWindow::new(27, 33)],
        ..Strategy::default()
    };
    let mut chart = CurveChart::new(
        NullRenderer::default(),
        CurveChartConfig::default(),
        Rc::new(strategy),
        60,
    )
    .expect("chart init");
    chart.set_viewport(ViewportSize::new(800, 300));
    chart.pointer_move(400.0).expect("readout");
    chart
}

#[test]
fn hover_adds_marker_and_tooltip_text() {
    let mut chart = hovered_chart();
    let frame = chart.build_render_frame().expect("frame");
    frame.validate().expect("valid frame");

    assert_eq!(frame.circles.len(), 1);
    // Three tick labels, two captions, five tooltip lines.
    assert_eq!(frame.texts.len(), 10);
    assert!(frame.texts.iter().any(|t| t.text == "Pit window: 27-33"));
}

#[test]
fn null_renderer_records_frame_counts() {
    let mut chart = hovered_chart();
    chart.render().expect("render");
    let renderer = chart.into_renderer();

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_polyline_count, 2);
    assert_eq!(renderer.last_rect_count, 1);
    assert_eq!(renderer.last_text_count, 10);
}

#[test]
fn pit_band_is_clipped_to_plot_area() {
    let strategy = Strategy {
        stint_lengths: vec![10],
        pit_windows: vec![PitWindow::new(8, 40)],
        ..Strategy::default()
    };
    let mut chart = CurveChart::new(
        NullRenderer::default(),
        CurveChartConfig::default(),
        Rc::new(strategy),
        10,
    )
    .expect("chart init");
    chart.set_viewport(ViewportSize::new(400, 200));

    let frame = chart.build_render_frame().expect("frame");
    let band = frame.rects[0];
    assert!((band.x + band.width - (400.0 - 14.0)).abs() <= 1e-9);
}

#[test]
fn frame_clips_out_of_domain_paths_to_plot_area() {
    let strategy = Strategy {
        strategy_id: Some("flat".to_owned()),
        stint_curves: vec![StintCurve::new(Compound::Medium, 1, vec![100.0; 10], vec![])],
        ..Strategy::default()
    };
    let mut chart = CurveChart::new(
        NullRenderer::default(),
        CurveChartConfig::default(),
        Rc::new(strategy),
        10,
    )
    .expect("chart init");
    chart.set_domain_source(DomainSource::provided(80.0, 90.0));
    chart.set_viewport(ViewportSize::new(656, 236));
    chart.pointer_move(342.0).expect("readout");

    let frame = chart.build_render_frame().expect("frame");
    frame.validate().expect("valid frame");
    let clip = frame.plot_clip.expect("plot clip");
    assert_eq!(clip, ClipRect::new(42.0, 14.0, 600.0, 200.0));

    // 100 s sits far above an 80-90 s domain, so every point needs the clip.
    let path = &frame.polylines[0];
    assert_eq!(path.points.len(), 10);
    assert!(path.points.iter().all(|&(x, y)| !clip.contains(x, y)));
    let marker = frame.circles[0];
    assert!(!clip.contains(marker.cx, marker.cy));

    // Axis lines stay inside the clip edges.
    assert!(
        frame
            .lines
            .iter()
            .all(|line| clip.contains(line.x1, line.y1) && clip.contains(line.x2, line.y2))
    );
}

#[test]
fn frame_validation_rejects_degenerate_clip() {
    let frame = RenderFrame::new(ViewportSize::new(200, 100))
        .with_plot_clip(ClipRect::new(10.0, 10.0, 0.0, 50.0));
    assert!(matches!(frame.validate(), Err(CurveError::InvalidData(_))));

    let frame = RenderFrame::new(ViewportSize::new(200, 100))
        .with_plot_clip(ClipRect::new(f64::NAN, 10.0, 20.0, 50.0));
    assert!(frame.validate().is_err());

    let frame = RenderFrame::new(ViewportSize::new(200, 100))
        .with_plot_clip(ClipRect::new(10.0, 10.0, 180.0, 80.0));
    frame.validate().expect("valid clip");
}

#[test]
fn frame_validation_rejects_non_finite_geometry() {
    let color = Color::rgb(0.2, 0.2, 0.2);
    let mut frame = RenderFrame::new(ViewportSize::new(200, 100));
    frame
        .lines
        .push(LinePrimitive::new(0.0, 0.0, f64::NAN, 10.0, 1.0, color));
    assert!(matches!(frame.validate(), Err(CurveError::InvalidData(_))));

    let mut frame = RenderFrame::new(ViewportSize::new(200, 100));
    frame
        .polylines
        .push(PolylinePrimitive::new(vec![(0.0, 0.0), (5.0, f64::INFINITY)], 2.0, color));
    assert!(frame.validate().is_err());

    let mut frame = RenderFrame::new(ViewportSize::new(200, 100));
    frame
        .circles
        .push(CirclePrimitive::new(10.0, 10.0, -1.0, color));
    assert!(frame.validate().is_err());
}

#[test]
fn frame_validation_rejects_bad_colors_and_empty_viewport() {
    let translucent = Color::rgba(1.0, 0.0, 0.0, 1.5);
    let mut frame = RenderFrame::new(ViewportSize::new(200, 100));
    frame
        .rects
        .push(RectPrimitive::new(0.0, 0.0, 10.0, 10.0, translucent));
    assert!(frame.validate().is_err());

    let text = TextPrimitive::new("Lap", 0.0, 0.0, 10.0, Color::rgb(0.0, 0.0, 0.0), TextHAlign::Left);
    let mut frame = RenderFrame::new(ViewportSize::new(0, 100));
    frame.texts.push(text);
    assert!(matches!(
        frame.validate(),
        Err(CurveError::InvalidViewport { width: 0, height: 100 })
    ));
}

#[test]
fn null_renderer_refuses_invalid_frames() {
    let mut renderer = NullRenderer::default();
    let frame = RenderFrame::new(ViewportSize::new(0, 0));
    assert!(renderer.render(&frame).is_err());
    assert_eq!(renderer.frames_rendered, 0);
    assert!(frame.is_empty());
}

#[test]
fn default_style_is_valid() {
    SceneStyle::default().validate().expect("valid style");
    let broken = SceneStyle {
        stint_line_width: 0.0,
        ..SceneStyle::default()
    };
    assert!(broken.validate().is_err());
}
