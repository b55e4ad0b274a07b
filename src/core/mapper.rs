use serde::{Deserialize, Serialize};

use crate::core::{MappedSample, Padding, Sample, ValueDomain, ViewportSize};
use crate::error::{CurveError, CurveResult};

/// Plotting rectangle inside the padded surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Lap / lap-time to pixel transform for one chart layout.
///
/// Laps map linearly from `[1, total_laps]` onto the plot width. Lap times map
/// from `[domain.min, domain.max]` onto the plot height with slower laps on top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    viewport: ViewportSize,
    padding: Padding,
    total_laps: u32,
    domain: ValueDomain,
    area: PlotArea,
}

impl CoordinateMapper {
    /// Builds a mapper, refusing viewports below `min_usable_size_px`.
    pub fn new(
        viewport: ViewportSize,
        padding: Padding,
        total_laps: u32,
        domain: ValueDomain,
        min_usable_size_px: u32,
    ) -> CurveResult<Self> {
        if !viewport.is_usable_with(min_usable_size_px) {
            return Err(CurveError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let padding = padding.validate()?;

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let area = PlotArea {
            left: padding.left,
            top: padding.top,
            width: (width - padding.left - padding.right).max(1.0),
            height: (height - padding.top - padding.bottom).max(1.0),
        };

        Ok(Self {
            viewport,
            padding,
            total_laps,
            domain,
            area,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    #[must_use]
    pub fn total_laps(&self) -> u32 {
        self.total_laps
    }

    #[must_use]
    pub fn domain(&self) -> ValueDomain {
        self.domain
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn lap_to_x(&self, lap: f64) -> f64 {
        if self.total_laps <= 1 || !lap.is_finite() {
            return self.area.left;
        }
        let ratio = (lap - 1.0) / f64::from(self.total_laps - 1);
        self.area.left + ratio * self.area.width
    }

    /// Inverse of [`Self::lap_to_x`]; every x reads as lap 1 on a single-lap axis.
    #[must_use]
    pub fn x_to_lap(&self, x: f64) -> f64 {
        if self.total_laps <= 1 || !x.is_finite() {
            return 1.0;
        }
        let ratio = (x - self.area.left) / self.area.width;
        1.0 + ratio * f64::from(self.total_laps - 1)
    }

    /// Non-finite lap times land on the vertical center of the plot.
    #[must_use]
    pub fn lap_time_to_y(&self, lap_time: f64) -> f64 {
        if !lap_time.is_finite() {
            return self.area.top + self.area.height / 2.0;
        }
        let ratio = (lap_time - self.domain.min()) / self.domain.span();
        self.area.bottom() - ratio * self.area.height
    }

    #[must_use]
    pub fn y_to_lap_time(&self, y: f64) -> f64 {
        if !y.is_finite() {
            return self.domain.midpoint();
        }
        let ratio = (self.area.bottom() - y) / self.area.height;
        self.domain.min() + ratio * self.domain.span()
    }

    #[must_use]
    pub fn map_sample(&self, sample: &Sample, stint_index: usize) -> MappedSample {
        MappedSample {
            x: self.lap_to_x(f64::from(sample.lap)),
            y: self.lap_time_to_y(sample.lap_time),
            sample: sample.clone(),
            stint_index,
        }
    }
}
