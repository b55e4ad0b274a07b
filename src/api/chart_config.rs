use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_MIN_USABLE_SIZE_PX, DomainTuning, Padding, SizeTrackerConfig, SynthesisDefaults,
};
use crate::error::{CurveError, CurveResult};

use super::validation::validate_chart_config;

/// Per-chart bootstrap configuration.
///
/// Serializable so dashboards can ship chart setup alongside their theme
/// without inventing an ad-hoc format. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveChartConfig {
    #[serde(default)]
    pub padding: Padding,
    #[serde(default = "default_min_usable_size_px")]
    pub min_usable_size_px: u32,
    #[serde(default = "default_max_retry_frames")]
    pub max_retry_frames: u32,
    #[serde(default)]
    pub domain: DomainTuning,
    #[serde(default)]
    pub synthesis: SynthesisDefaults,
    #[serde(default = "default_pit_window_min_width_px")]
    pub pit_window_min_width_px: f64,
    #[serde(default = "default_axis_tick_count")]
    pub axis_tick_count: usize,
    #[serde(default = "default_lap_gridline_fractions")]
    pub lap_gridline_fractions: Vec<f64>,
    #[serde(default = "default_hover_marker_radius_px")]
    pub hover_marker_radius_px: f64,
}

impl Default for CurveChartConfig {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            min_usable_size_px: default_min_usable_size_px(),
            max_retry_frames: default_max_retry_frames(),
            domain: DomainTuning::default(),
            synthesis: SynthesisDefaults::default(),
            pit_window_min_width_px: default_pit_window_min_width_px(),
            axis_tick_count: default_axis_tick_count(),
            lap_gridline_fractions: default_lap_gridline_fractions(),
            hover_marker_radius_px: default_hover_marker_radius_px(),
        }
    }
}

impl CurveChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_min_usable_size_px(mut self, min_usable_size_px: u32) -> Self {
        self.min_usable_size_px = min_usable_size_px;
        self
    }

    #[must_use]
    pub fn with_max_retry_frames(mut self, max_retry_frames: u32) -> Self {
        self.max_retry_frames = max_retry_frames;
        self
    }

    #[must_use]
    pub fn with_domain_tuning(mut self, domain: DomainTuning) -> Self {
        self.domain = domain;
        self
    }

    /// Overrides the lap-time baseline used when expected time is unusable.
    #[must_use]
    pub fn with_fallback_baseline_s(mut self, seconds: f64) -> Self {
        self.synthesis.fallback_baseline_s = seconds;
        self
    }

    #[must_use]
    pub fn with_synthesis(mut self, synthesis: SynthesisDefaults) -> Self {
        self.synthesis = synthesis;
        self
    }

    #[must_use]
    pub fn with_pit_window_min_width_px(mut self, width: f64) -> Self {
        self.pit_window_min_width_px = width;
        self
    }

    #[must_use]
    pub fn with_axis_tick_count(mut self, count: usize) -> Self {
        self.axis_tick_count = count;
        self
    }

    #[must_use]
    pub fn with_lap_gridline_fractions(mut self, fractions: Vec<f64>) -> Self {
        self.lap_gridline_fractions = fractions;
        self
    }

    #[must_use]
    pub fn size_tracker_config(&self) -> SizeTrackerConfig {
        SizeTrackerConfig {
            min_usable_size_px: self.min_usable_size_px,
            max_retry_frames: self.max_retry_frames,
        }
    }

    pub fn validate(&self) -> CurveResult<()> {
        validate_chart_config(self)
    }

    pub fn from_json_str(input: &str) -> CurveResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| CurveError::Parse(format!("failed to parse chart config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> CurveResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CurveError::Parse(format!("failed to serialize chart config: {e}")))
    }
}

fn default_min_usable_size_px() -> u32 {
    DEFAULT_MIN_USABLE_SIZE_PX
}

fn default_max_retry_frames() -> u32 {
    SizeTrackerConfig::default().max_retry_frames
}

fn default_pit_window_min_width_px() -> f64 {
    2.0
}

fn default_axis_tick_count() -> usize {
    3
}

fn default_lap_gridline_fractions() -> Vec<f64> {
    vec![0.33, 0.66]
}

fn default_hover_marker_radius_px() -> f64 {
    4.0
}
