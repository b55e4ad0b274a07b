use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::core::{
    Compound, CoordinateMapper, CurveData, CurveDataBuilder, DomainResolver, DomainSource,
    HoverLocator, HoverReadout, MappedSample, Padding, PitWindowProjector, PitWindowRect, PlotArea,
    ResolvedDomain, Strategy, ValueDomain, ViewportSize,
};
use crate::error::CurveResult;
use crate::render::Color;

use super::label_format::{
    format_axis_value, format_lap_time, format_pit_window, format_race_duration,
    format_tyre_life, format_variance,
};
use super::{CompoundPalette, CurveChartConfig, LegendEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapGridline {
    pub lap: u32,
    pub x: f64,
}

/// One stint drawn as its own path, so segments never join across a tyre change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StintPolyline {
    pub compound: Compound,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneHeader {
    pub kind: String,
    pub expected_time: String,
    pub variance: String,
    pub stop_count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipPayload {
    pub lines: Vec<String>,
    /// Marker position as a percentage of the viewport width.
    pub anchor_x_pct: f64,
    /// Marker position as a percentage of the viewport height.
    pub anchor_y_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverMarker {
    pub readout: HoverReadout,
    pub radius: f64,
    pub tooltip: TooltipPayload,
}

/// Renderable description of one strategy chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveScene {
    pub viewport: ViewportSize,
    pub plot_area: PlotArea,
    pub domain: ValueDomain,
    pub header: SceneHeader,
    pub legend: Vec<LegendEntry>,
    pub y_ticks: Vec<AxisTick>,
    pub lap_gridlines: SmallVec<[LapGridline; 4]>,
    pub stints: Vec<StintPolyline>,
    /// Every mapped sample in stint order, used for hover lookup.
    pub samples: Vec<MappedSample>,
    pub pit_windows: Vec<PitWindowRect>,
    pub pit_window_color: Color,
    pub hover: Option<HoverMarker>,
}

/// Outcome of a scene pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurveSceneState {
    /// Strategy produced no drawable samples.
    NoData,
    /// Surface too small to lay out; show a skeleton.
    Loading,
    Ready(Box<CurveScene>),
}

impl CurveSceneState {
    #[must_use]
    pub fn as_ready(&self) -> Option<&CurveScene> {
        match self {
            Self::Ready(scene) => Some(scene.as_ref()),
            Self::NoData | Self::Loading => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Samples and vertical range of one strategy, independent of layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    pub curve_data: CurveData,
    pub domain: ResolvedDomain,
}

/// Everything one scene pass reads.
#[derive(Debug, Clone, Copy)]
pub struct SceneInputs<'a> {
    pub strategy: &'a Strategy,
    pub total_laps: u32,
    pub domain_source: DomainSource,
    pub viewport: ViewportSize,
    pub palette: &'a CompoundPalette,
    pub selected: bool,
    pub pointer_x: Option<f64>,
}

/// Composes data building, domain resolution, mapping and hover lookup.
///
/// All methods are pure: identical inputs yield identical scenes.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSceneBuilder {
    padding: Padding,
    min_usable_size_px: u32,
    axis_tick_count: usize,
    lap_gridline_fractions: Vec<f64>,
    hover_marker_radius_px: f64,
    curve_builder: CurveDataBuilder,
    resolver: DomainResolver,
    projector: PitWindowProjector,
    locator: HoverLocator,
}

impl Default for CurveSceneBuilder {
    fn default() -> Self {
        Self::from_config(&CurveChartConfig::default())
    }
}

impl CurveSceneBuilder {
    #[must_use]
    pub fn from_config(config: &CurveChartConfig) -> Self {
        Self {
            padding: config.padding,
            min_usable_size_px: config.min_usable_size_px,
            axis_tick_count: config.axis_tick_count.max(2),
            lap_gridline_fractions: config.lap_gridline_fractions.clone(),
            hover_marker_radius_px: config.hover_marker_radius_px,
            curve_builder: CurveDataBuilder::new(config.synthesis.clone()),
            resolver: DomainResolver::new(config.domain),
            projector: PitWindowProjector::new(config.pit_window_min_width_px),
            locator: HoverLocator::new(config.min_usable_size_px),
        }
    }

    #[must_use]
    pub fn curve_builder(&self) -> &CurveDataBuilder {
        &self.curve_builder
    }

    #[must_use]
    pub fn resolver(&self) -> &DomainResolver {
        &self.resolver
    }

    /// Full pass from raw inputs to a scene state.
    #[must_use]
    pub fn build(&self, inputs: SceneInputs<'_>) -> CurveSceneState {
        let data = self.build_data(inputs.strategy, inputs.total_laps, inputs.domain_source);
        let mut state = self.build_geometry_or_placeholder(
            &data,
            inputs.strategy,
            inputs.total_laps,
            inputs.viewport,
            inputs.palette,
            inputs.selected,
        );
        if let (CurveSceneState::Ready(scene), Some(pointer_x)) = (&mut state, inputs.pointer_x) {
            let hover = self.hover_marker(scene, pointer_x);
            scene.hover = hover;
        }
        state
    }

    #[must_use]
    pub fn build_data(
        &self,
        strategy: &Strategy,
        total_laps: u32,
        domain_source: DomainSource,
    ) -> DataModel {
        let curve_data = self.curve_builder.build(strategy, total_laps);
        let domain = self
            .resolver
            .resolve_detailed(domain_source, curve_data.lap_times());
        DataModel { curve_data, domain }
    }

    /// Layout pass; degrades mapper failures to the loading placeholder.
    #[must_use]
    pub fn build_geometry_or_placeholder(
        &self,
        data: &DataModel,
        strategy: &Strategy,
        total_laps: u32,
        viewport: ViewportSize,
        palette: &CompoundPalette,
        selected: bool,
    ) -> CurveSceneState {
        match self.build_geometry(data, strategy, total_laps, viewport, palette, selected) {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "scene geometry failed, showing placeholder");
                CurveSceneState::Loading
            }
        }
    }

    pub fn build_geometry(
        &self,
        data: &DataModel,
        strategy: &Strategy,
        total_laps: u32,
        viewport: ViewportSize,
        palette: &CompoundPalette,
        selected: bool,
    ) -> CurveResult<CurveSceneState> {
        if data.curve_data.is_empty() {
            return Ok(CurveSceneState::NoData);
        }
        if !viewport.is_usable_with(self.min_usable_size_px) {
            return Ok(CurveSceneState::Loading);
        }

        let mapper = CoordinateMapper::new(
            viewport,
            self.padding,
            total_laps,
            data.domain.domain,
            self.min_usable_size_px,
        )?;

        let mut samples = Vec::with_capacity(data.curve_data.sample_count());
        let mut stints = Vec::with_capacity(data.curve_data.stints().len());
        for (stint_index, stint) in data.curve_data.stints().iter().enumerate() {
            let mapped: Vec<MappedSample> = stint
                .samples
                .iter()
                .map(|sample| mapper.map_sample(sample, stint_index))
                .collect();
            stints.push(StintPolyline {
                compound: stint.compound.clone(),
                color: palette.color_for(&stint.compound),
                points: mapped.iter().map(|m| (m.x, m.y)).collect(),
            });
            samples.extend(mapped);
        }

        let scene = CurveScene {
            viewport,
            plot_area: mapper.plot_area(),
            domain: mapper.domain(),
            header: scene_header(strategy, selected),
            legend: palette.legend(),
            y_ticks: self.y_ticks(&mapper),
            lap_gridlines: lap_gridline_laps(total_laps, &self.lap_gridline_fractions)
                .into_iter()
                .map(|lap| LapGridline {
                    lap,
                    x: mapper.lap_to_x(f64::from(lap)),
                })
                .collect(),
            stints,
            samples,
            pit_windows: self.projector.project(&strategy.pit_windows, &mapper),
            pit_window_color: palette.pit_window(),
            hover: None,
        };
        Ok(CurveSceneState::Ready(Box::new(scene)))
    }

    /// Hover marker for a pointer x in surface pixels.
    #[must_use]
    pub fn hover_marker(&self, scene: &CurveScene, pointer_x: f64) -> Option<HoverMarker> {
        let readout =
            self.locator
                .locate(scene.viewport, pointer_x, &scene.samples, &scene.pit_windows)?;
        let tooltip = tooltip_for(&readout, scene.viewport);
        Some(HoverMarker {
            readout,
            radius: self.hover_marker_radius_px,
            tooltip,
        })
    }

    fn y_ticks(&self, mapper: &CoordinateMapper) -> Vec<AxisTick> {
        let domain = mapper.domain();
        let steps = self.axis_tick_count - 1;
        (0..=steps)
            .map(|i| {
                let value = if i == steps {
                    domain.max()
                } else {
                    domain.min() + domain.span() * (i as f64) / (steps as f64)
                };
                AxisTick {
                    value,
                    y: mapper.lap_time_to_y(value),
                    label: format_axis_value(value),
                }
            })
            .collect()
    }
}

/// Laps carrying a vertical gridline: lap 1, each fraction of the race, the last lap.
///
/// Duplicates and non-positive laps are dropped; first occurrence order is kept.
#[must_use]
pub fn lap_gridline_laps(total_laps: u32, fractions: &[f64]) -> SmallVec<[u32; 4]> {
    let candidates = std::iter::once(1)
        .chain(
            fractions
                .iter()
                .map(|fraction| (fraction * f64::from(total_laps)).floor().max(0.0) as u32),
        )
        .chain(std::iter::once(total_laps));

    let mut laps: SmallVec<[u32; 4]> = SmallVec::new();
    for lap in candidates {
        if lap > 0 && !laps.contains(&lap) {
            laps.push(lap);
        }
    }
    laps
}

fn scene_header(strategy: &Strategy, selected: bool) -> SceneHeader {
    SceneHeader {
        kind: strategy.kind.clone(),
        expected_time: format_race_duration(strategy.expected_time),
        variance: format_variance(strategy.variance),
        stop_count: strategy.stop_count(),
        selected,
    }
}

fn tooltip_for(readout: &HoverReadout, viewport: ViewportSize) -> TooltipPayload {
    let mut lines = vec![
        format!("Lap {}", readout.lap),
        readout.compound.to_string(),
        format_lap_time(readout.lap_time),
    ];
    if let Some(tyre_life) = readout.tyre_life {
        lines.push(format_tyre_life(tyre_life));
    }
    lines.push(format_pit_window(readout.active_window.as_ref()));

    TooltipPayload {
        lines,
        anchor_x_pct: readout.x / f64::from(viewport.width.max(1)) * 100.0,
        anchor_y_pct: readout.y / f64::from(viewport.height.max(1)) * 100.0,
    }
}
