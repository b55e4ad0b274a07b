use serde::{Deserialize, Serialize};

use crate::core::Compound;
use crate::error::{CurveError, CurveResult};

/// Smallest surface edge, in pixels, that still yields a readable chart.
pub const DEFAULT_MIN_USABLE_SIZE_PX: u32 = 50;

/// Pixel size of a chart drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Builds a size from a host-measured box, flooring fractional pixels.
    ///
    /// Negative and non-finite measurements collapse to zero so a surface that
    /// has not been laid out yet reads as unusable instead of garbage.
    #[must_use]
    pub fn from_measured(width: f64, height: f64) -> Self {
        Self {
            width: floor_to_px(width),
            height: floor_to_px(height),
        }
    }

    #[must_use]
    pub fn is_usable(self) -> bool {
        self.is_usable_with(DEFAULT_MIN_USABLE_SIZE_PX)
    }

    #[must_use]
    pub fn is_usable_with(self, min_size_px: u32) -> bool {
        self.width >= min_size_px && self.height >= min_size_px
    }
}

fn floor_to_px(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.floor().min(f64::from(u32::MAX)) as u32
}

/// Fixed inset between the surface edge and the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 14.0,
            right: 14.0,
            bottom: 22.0,
            left: 42.0,
        }
    }
}

impl Padding {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn validate(self) -> CurveResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CurveError::InvalidConfig(format!(
                    "padding `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Raw, unchecked vertical bounds as supplied by a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainBounds {
    pub min: f64,
    pub max: f64,
}

impl DomainBounds {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Lap-time range mapped onto the vertical axis.
///
/// Always finite with `max > min`; construction rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DomainBounds", into = "DomainBounds")]
pub struct ValueDomain {
    min: f64,
    max: f64,
}

impl ValueDomain {
    /// Plausible lap-time band used whenever data cannot produce a range.
    pub const FALLBACK: Self = Self {
        min: 89.0,
        max: 95.0,
    };

    pub fn new(min: f64, max: f64) -> CurveResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(CurveError::InvalidData(
                "value domain bounds must be finite".to_owned(),
            ));
        }
        if max <= min {
            return Err(CurveError::InvalidData(format!(
                "value domain max ({max}) must exceed min ({min})"
            )));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn midpoint(self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl TryFrom<DomainBounds> for ValueDomain {
    type Error = CurveError;

    fn try_from(bounds: DomainBounds) -> CurveResult<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

impl From<ValueDomain> for DomainBounds {
    fn from(domain: ValueDomain) -> Self {
        Self::new(domain.min, domain.max)
    }
}

/// One lap of one stint, before projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub lap: u32,
    pub compound: Compound,
    /// Lap time in seconds, always finite.
    pub lap_time: f64,
    /// Remaining tyre performance in percent; `None` when the source value was not finite.
    pub tyre_life: Option<f64>,
}

/// Sample projected into surface pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedSample {
    pub sample: Sample,
    /// Index of the stint this sample belongs to, in build order.
    pub stint_index: usize,
    pub x: f64,
    pub y: f64,
}

impl MappedSample {
    #[must_use]
    pub fn lap(&self) -> u32 {
        self.sample.lap
    }
}
