use strategy_curves::core::{
    Compound, CoordinateMapper, HoverLocator, MappedSample, Padding, PitWindow,
    PitWindowProjector, PitWindowRect, Sample, ValueDomain, ViewportSize, surface_x_from_client,
};

fn mapped(lap: u32, x: f64) -> MappedSample {
    MappedSample {
        sample: Sample {
            lap,
            compound: Compound::Soft,
            lap_time: 90.0 + f64::from(lap) * 0.1,
            tyre_life: Some(100.0 - f64::from(lap)),
        },
        stint_index: 0,
        x,
        y: 100.0,
    }
}

fn viewport() -> ViewportSize {
    ViewportSize::new(656, 236)
}

#[test]
fn equidistant_pointer_picks_earlier_sample() {
    let samples = [mapped(10, 100.0), mapped(11, 120.0)];
    let readout = HoverLocator::default()
        .locate(viewport(), 110.0, &samples, &[])
        .expect("readout");

    assert_eq!(readout.lap, 10);
    assert!((readout.x - 100.0).abs() <= 1e-9);
}

#[test]
fn nearest_sample_wins_regardless_of_order() {
    let samples = [mapped(3, 300.0), mapped(1, 100.0), mapped(2, 200.0)];
    let nearest = HoverLocator::default()
        .nearest(190.0, &samples)
        .expect("nearest");
    assert_eq!(nearest.lap(), 2);
}

#[test]
fn pointer_outside_plot_clamps_to_edge_samples() {
    let samples = [mapped(1, 42.0), mapped(2, 300.0), mapped(3, 642.0)];
    let locator = HoverLocator::default();

    assert_eq!(locator.nearest(-500.0, &samples).expect("left").lap(), 1);
    assert_eq!(locator.nearest(5_000.0, &samples).expect("right").lap(), 3);
}

#[test]
fn readout_carries_sample_details_and_first_matching_window() {
    let mapper = CoordinateMapper::new(
        viewport(),
        Padding::default(),
        60,
        ValueDomain::FALLBACK,
        50,
    )
    .expect("usable viewport");
    let windows = PitWindowProjector::default().project(
        &[PitWindow::new(16, 19), PitWindow::new(18, 20)],
        &mapper,
    );
    let sample = Sample {
        lap: 18,
        compound: Compound::Medium,
        lap_time: 91.4,
        tyre_life: Some(12.5),
    };
    let samples = [mapper.map_sample(&sample, 1)];

    let readout = HoverLocator::default()
        .locate(viewport(), samples[0].x + 3.0, &samples, &windows)
        .expect("readout");

    assert_eq!(readout.compound, Compound::Medium);
    assert_eq!(readout.stint_index, 1);
    assert_eq!(readout.tyre_life, Some(12.5));
    let window = readout.active_window.expect("inside a window");
    assert_eq!((window.lap_min, window.lap_max), (16, 19));
}

#[test]
fn readout_outside_windows_has_no_active_window() {
    let windows = [PitWindowRect {
        lap_min: 30,
        lap_max: 32,
        x: 300.0,
        width: 20.0,
    }];
    let readout = HoverLocator::default()
        .locate(viewport(), 100.0, &[mapped(5, 100.0)], &windows)
        .expect("readout");
    assert!(readout.active_window.is_none());
}

#[test]
fn unusable_viewport_or_missing_samples_yield_nothing() {
    let locator = HoverLocator::default();
    let samples = [mapped(1, 100.0)];

    assert!(locator.locate(ViewportSize::new(0, 0), 100.0, &samples, &[]).is_none());
    assert!(locator.locate(ViewportSize::new(656, 30), 100.0, &samples, &[]).is_none());
    assert!(locator.locate(viewport(), 100.0, &[], &[]).is_none());
    assert!(locator.locate(viewport(), f64::NAN, &samples, &[]).is_none());
}

#[test]
fn non_finite_samples_are_skipped() {
    let samples = [mapped(1, f64::NAN), mapped(2, 400.0)];
    let nearest = HoverLocator::default().nearest(0.0, &samples).expect("nearest");
    assert_eq!(nearest.lap(), 2);
}

#[test]
fn client_position_is_rescaled_to_surface_pixels() {
    // Surface drawn at 656px but displayed at half size.
    let x = surface_x_from_client(264.0, 100.0, 328.0, viewport()).expect("surface x");
    assert!((x - 328.0).abs() <= 1e-9);

    assert!(surface_x_from_client(10.0, 0.0, 0.0, viewport()).is_none());
    assert!(surface_x_from_client(f64::NAN, 0.0, 328.0, viewport()).is_none());
}
