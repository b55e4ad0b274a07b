use std::hint::black_box;
use std::rc::Rc;

use criterion::{Criterion, criterion_group, criterion_main};
use strategy_curves::api::{CompoundPalette, CurveSceneBuilder, SceneInputs};
use strategy_curves::core::{Compound, DomainSource, PitWindow, Strategy, ViewportSize};
use strategy_curves::render::NullRenderer;
use strategy_curves::{CurveChart, CurveChartConfig};

fn three_stint_strategy() -> Strategy {
    Strategy {
        strategy_id: Some("bench".to_owned()),
        kind: "two-stop".to_owned(),
        expected_time: 70.0 * 91.5,
        variance: 3.0,
        stint_lengths: vec![22, 24, 24],
        compounds: vec![Compound::Soft, Compound::Medium, Compound::Hard],
        stop_laps: vec![22, 46],
        pit_windows: vec![PitWindow::new(19, 25), PitWindow::new(43, 49)],
        ..Strategy::default()
    }
}

fn bench_scene_build(c: &mut Criterion) {
    let strategy = three_stint_strategy();
    let palette = CompoundPalette::default();
    let builder = CurveSceneBuilder::default();

    c.bench_function("scene_build_70_laps", |b| {
        b.iter(|| {
            let state = builder.build(SceneInputs {
                strategy: black_box(&strategy),
                total_laps: 70,
                domain_source: DomainSource::ComputeFromData,
                viewport: ViewportSize::new(640, 260),
                palette: &palette,
                selected: false,
                pointer_x: Some(black_box(321.0)),
            });
            black_box(state);
        })
    });
}

fn bench_hover_on_cached_chart(c: &mut Criterion) {
    let mut chart = CurveChart::new(
        NullRenderer::default(),
        CurveChartConfig::default(),
        Rc::new(three_stint_strategy()),
        70,
    )
    .expect("chart init");
    chart.set_viewport(ViewportSize::new(640, 260));
    chart.render().expect("initial render");

    let mut x = 42.0;
    c.bench_function("hover_70_laps", |b| {
        b.iter(|| {
            x = if x > 620.0 { 42.0 } else { x + 7.0 };
            black_box(chart.pointer_move(black_box(x)));
        })
    });
}

criterion_group!(benches, bench_scene_build, bench_hover_on_cached_chart);
criterion_main!(benches);
