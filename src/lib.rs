//! strategy-curves: responsive lap-time degradation curves for race strategies.
//!
//! The crate turns pit-stop strategies into chart scenes: per-lap samples,
//! a shared or per-chart lap-time domain, pixel mapping inside a padded plot,
//! pit-window bands and nearest-sample hover lookup. Surface sizing under
//! asynchronous layout is handled by [`core::SizeTracker`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{CurveChart, CurveChartConfig, CurveScene, CurveSceneState};
pub use error::{CurveError, CurveResult};
