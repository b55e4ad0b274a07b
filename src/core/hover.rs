use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Compound, DEFAULT_MIN_USABLE_SIZE_PX, MappedSample, PitWindowRect, ViewportSize};

/// Tooltip payload for the sample under the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverReadout {
    pub lap: u32,
    pub compound: Compound,
    pub lap_time: f64,
    pub tyre_life: Option<f64>,
    /// First pit window containing the lap, if any.
    pub active_window: Option<PitWindowRect>,
    pub stint_index: usize,
    pub x: f64,
    pub y: f64,
}

/// Converts a host client-space pointer x into surface pixels.
///
/// The surface may be CSS-scaled, so the offset inside the bounding box is
/// rescaled to the tracked viewport width. Returns `None` for a collapsed box.
#[must_use]
pub fn surface_x_from_client(
    client_x: f64,
    bounding_left: f64,
    bounding_width: f64,
    viewport: ViewportSize,
) -> Option<f64> {
    if !client_x.is_finite()
        || !bounding_left.is_finite()
        || !bounding_width.is_finite()
        || bounding_width <= 0.0
    {
        return None;
    }
    Some((client_x - bounding_left) / bounding_width * f64::from(viewport.width))
}

/// Resolves a pointer x to the nearest mapped sample.
///
/// A linear scan; per-chart sample counts stay in the low hundreds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverLocator {
    min_usable_size_px: u32,
}

impl Default for HoverLocator {
    fn default() -> Self {
        Self {
            min_usable_size_px: DEFAULT_MIN_USABLE_SIZE_PX,
        }
    }
}

impl HoverLocator {
    #[must_use]
    pub fn new(min_usable_size_px: u32) -> Self {
        Self { min_usable_size_px }
    }

    /// Sample with the smallest horizontal distance to `pointer_x`.
    ///
    /// On exact ties the earliest sample in sequence wins.
    #[must_use]
    pub fn nearest<'a>(&self, pointer_x: f64, samples: &'a [MappedSample]) -> Option<&'a MappedSample> {
        if !pointer_x.is_finite() {
            return None;
        }

        let mut best: Option<(OrderedFloat<f64>, &MappedSample)> = None;
        for sample in samples {
            if !sample.x.is_finite() || !sample.y.is_finite() {
                continue;
            }
            let dist = OrderedFloat((sample.x - pointer_x).abs());
            match best {
                Some((current, _)) if current <= dist => {}
                _ => best = Some((dist, sample)),
            }
        }
        best.map(|(_, sample)| sample)
    }

    #[must_use]
    pub fn locate(
        &self,
        viewport: ViewportSize,
        pointer_x: f64,
        samples: &[MappedSample],
        windows: &[PitWindowRect],
    ) -> Option<HoverReadout> {
        if !viewport.is_usable_with(self.min_usable_size_px) {
            return None;
        }
        let nearest = self.nearest(pointer_x, samples)?;
        let active_window = windows
            .iter()
            .find(|window| window.contains_lap(nearest.lap()))
            .copied();
        trace!(
            pointer_x,
            lap = nearest.lap(),
            in_window = active_window.is_some(),
            "hover resolved"
        );

        Some(HoverReadout {
            lap: nearest.sample.lap,
            compound: nearest.sample.compound.clone(),
            lap_time: nearest.sample.lap_time,
            tyre_life: nearest.sample.tyre_life,
            active_window,
            stint_index: nearest.stint_index,
            x: nearest.x,
            y: nearest.y,
        })
    }
}
