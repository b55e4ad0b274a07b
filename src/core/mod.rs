pub mod curve_data;
pub mod domain;
pub mod hover;
pub mod mapper;
pub mod pit_window;
pub mod size_tracker;
pub mod strategy;
pub mod types;

pub use curve_data::{CurveData, CurveDataBuilder, StintSamples, SynthesisDefaults};
pub use domain::{DomainOrigin, DomainResolver, DomainSource, DomainTuning, ResolvedDomain};
pub use hover::{HoverLocator, HoverReadout, surface_x_from_client};
pub use mapper::{CoordinateMapper, PlotArea};
pub use pit_window::{PitWindowProjector, PitWindowRect};
pub use size_tracker::{FrameToken, LayoutHost, SizeTracker, SizeTrackerConfig};
pub use strategy::{
    Compound, CompoundDegradation, DEFAULT_TOTAL_LAPS, PitWindow, RaceContext, StintCurve,
    Strategy, StrategySet,
};
pub use types::{
    DEFAULT_MIN_USABLE_SIZE_PX, DomainBounds, MappedSample, Padding, Sample, ValueDomain,
    ViewportSize,
};
