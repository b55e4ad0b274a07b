use strategy_curves::core::{
    CoordinateMapper, Padding, PitWindow, PitWindowProjector, ValueDomain, ViewportSize,
};

fn mapper(total_laps: u32) -> CoordinateMapper {
    CoordinateMapper::new(
        ViewportSize::new(656, 236),
        Padding::default(),
        total_laps,
        ValueDomain::FALLBACK,
        50,
    )
    .expect("usable viewport")
}

#[test]
fn window_spans_its_lap_range() {
    let mapper = mapper(60);
    let rect = PitWindowProjector::default().project_one(PitWindow::new(18, 20), &mapper);

    let expected_x = 42.0 + 17.0 / 59.0 * 600.0;
    let expected_width = 2.0 / 59.0 * 600.0;
    assert!((rect.x - expected_x).abs() <= 1e-9);
    assert!((rect.width - expected_width).abs() <= 1e-9);
    assert!(rect.contains_lap(19));
    assert!(!rect.contains_lap(21));
}

#[test]
fn single_lap_window_keeps_minimum_width() {
    let mapper = mapper(60);
    let rect = PitWindowProjector::default().project_one(PitWindow::new(30, 30), &mapper);

    assert!((rect.x - mapper.lap_to_x(30.0)).abs() <= 1e-9);
    assert!((rect.width - 2.0).abs() <= 1e-9);

    let wide = PitWindowProjector::new(6.0).project_one(PitWindow::new(30, 30), &mapper);
    assert!((wide.width - 6.0).abs() <= 1e-9);
}

#[test]
fn malformed_windows_are_clamped() {
    let mapper = mapper(60);
    let projector = PitWindowProjector::default();

    let zero = projector.project_one(PitWindow::new(0, 0), &mapper);
    assert_eq!((zero.lap_min, zero.lap_max), (1, 1));
    assert!((zero.x - 42.0).abs() <= 1e-9);

    let inverted = projector.project_one(PitWindow::new(25, 10), &mapper);
    assert_eq!((inverted.lap_min, inverted.lap_max), (25, 25));
    assert!((inverted.width - 2.0).abs() <= 1e-9);
}

#[test]
fn overlapping_windows_are_projected_independently() {
    let mapper = mapper(60);
    let rects = PitWindowProjector::default().project(
        &[PitWindow::new(15, 22), PitWindow::new(20, 25), PitWindow::new(40, 44)],
        &mapper,
    );

    assert_eq!(rects.len(), 3);
    assert_eq!(rects[0].lap_min, 15);
    assert_eq!(rects[1].lap_min, 20);
    assert!(rects[1].x < rects[0].x + rects[0].width);
}

#[test]
fn no_windows_yield_no_rects() {
    assert!(PitWindowProjector::default().project(&[], &mapper(60)).is_empty());
}
