mod chart;
mod chart_config;
mod invalidation;
pub mod label_format;
mod palette;
mod render_frame_builder;
mod render_style;
mod scene;
mod validation;

pub use chart::CurveChart;
pub use chart_config::CurveChartConfig;
pub use invalidation::InvalidationLevel;
pub use palette::{CompoundPalette, LegendEntry};
pub use render_frame_builder::build_render_frame;
pub use render_style::SceneStyle;
pub use scene::{
    AxisTick, CurveScene, CurveSceneBuilder, CurveSceneState, DataModel, HoverMarker,
    LapGridline, SceneHeader, SceneInputs, StintPolyline, TooltipPayload, lap_gridline_laps,
};
