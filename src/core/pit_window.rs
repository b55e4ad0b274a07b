use serde::{Deserialize, Serialize};

use crate::core::{CoordinateMapper, PitWindow};

/// Pit window projected into pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitWindowRect {
    pub lap_min: u32,
    pub lap_max: u32,
    pub x: f64,
    pub width: f64,
}

impl PitWindowRect {
    #[must_use]
    pub fn contains_lap(&self, lap: u32) -> bool {
        lap >= self.lap_min && lap <= self.lap_max
    }
}

/// Projects pit windows onto the lap axis.
///
/// Windows are projected independently; overlapping windows are not merged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitWindowProjector {
    /// Narrowest rectangle emitted, so single-lap windows stay visible.
    pub min_width_px: f64,
}

impl Default for PitWindowProjector {
    fn default() -> Self {
        Self { min_width_px: 2.0 }
    }
}

impl PitWindowProjector {
    #[must_use]
    pub fn new(min_width_px: f64) -> Self {
        Self { min_width_px }
    }

    #[must_use]
    pub fn project(&self, windows: &[PitWindow], mapper: &CoordinateMapper) -> Vec<PitWindowRect> {
        windows
            .iter()
            .map(|window| self.project_one(*window, mapper))
            .collect()
    }

    #[must_use]
    pub fn project_one(&self, window: PitWindow, mapper: &CoordinateMapper) -> PitWindowRect {
        let lap_min = window.lap_min.max(1);
        let lap_max = window.lap_max.max(lap_min);
        let x1 = mapper.lap_to_x(f64::from(lap_min));
        let x2 = mapper.lap_to_x(f64::from(lap_max));
        PitWindowRect {
            lap_min,
            lap_max,
            x: x1.min(x2),
            width: (x2 - x1).abs().max(self.min_width_px),
        }
    }
}
