use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Compound, Sample, StintCurve, Strategy};

/// Knobs used when a strategy only carries stint lengths and compounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisDefaults {
    /// Per-lap baseline when expected time or lap count is unusable.
    ///
    /// Product has not confirmed this value; keep it overridable.
    pub fallback_baseline_s: f64,
    /// Lap-time increase per lap into a synthesized stint.
    pub degradation_step_s: f64,
    /// Compound used when a stint has no matching compound tag.
    pub default_compound: Compound,
}

impl Default for SynthesisDefaults {
    fn default() -> Self {
        Self {
            fallback_baseline_s: 92.0,
            degradation_step_s: 0.05,
            default_compound: Compound::Medium,
        }
    }
}

/// Samples of one stint, in lap order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StintSamples {
    pub compound: Compound,
    pub start_lap: u32,
    pub samples: Vec<Sample>,
}

/// Built per-lap data of one strategy, grouped by stint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveData {
    stints: Vec<StintSamples>,
    synthesized: bool,
}

impl CurveData {
    #[must_use]
    pub fn stints(&self) -> &[StintSamples] {
        &self.stints
    }

    /// Whether the samples came from stint summaries rather than service curves.
    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stints.iter().all(|stint| stint.samples.is_empty())
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.stints.iter().map(|stint| stint.samples.len()).sum()
    }

    /// All samples in stint order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.stints.iter().flat_map(|stint| stint.samples.iter())
    }

    pub fn lap_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples().map(|sample| sample.lap_time)
    }
}

/// Turns strategies into ordered per-lap samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveDataBuilder {
    defaults: SynthesisDefaults,
}

impl CurveDataBuilder {
    #[must_use]
    pub fn new(defaults: SynthesisDefaults) -> Self {
        Self { defaults }
    }

    #[must_use]
    pub fn defaults(&self) -> &SynthesisDefaults {
        &self.defaults
    }

    /// Builds samples from the strategy's stint curves, synthesizing them from
    /// stint lengths when the service sent none.
    ///
    /// Samples outside `[1, total_laps]` or with a non-finite lap time are
    /// dropped, and stints left without samples are omitted.
    #[must_use]
    pub fn build(&self, strategy: &Strategy, total_laps: u32) -> CurveData {
        let synthesized = !strategy.has_stint_curves();
        let synthesized_curves;
        let source: &[StintCurve] = if synthesized {
            synthesized_curves = self.synthesize_stint_curves(strategy, total_laps);
            &synthesized_curves
        } else {
            &strategy.stint_curves
        };

        let stints: Vec<StintSamples> = source
            .iter()
            .filter(|curve| curve.start_lap <= total_laps)
            .map(|curve| StintSamples {
                compound: curve.compound.clone(),
                start_lap: curve.start_lap,
                samples: samples_for_curve(curve, total_laps),
            })
            .filter(|stint| !stint.samples.is_empty())
            .collect();

        let data = CurveData {
            stints,
            synthesized,
        };
        debug!(
            strategy = %strategy.kind,
            synthesized,
            stint_count = data.stints.len(),
            sample_count = data.sample_count(),
            "built curve data"
        );
        data
    }

    /// Derives coarse per-stint curves from stint lengths and compounds.
    ///
    /// Lap times ramp linearly from `expected_time / total_laps` and tyre life
    /// falls from 100% to 0% across each stint.
    #[must_use]
    pub fn synthesize_stint_curves(&self, strategy: &Strategy, total_laps: u32) -> Vec<StintCurve> {
        let baseline = self.baseline_lap_time(strategy.expected_time, total_laps);
        let step = self.defaults.degradation_step_s;

        let mut next_lap: u32 = 1;
        let mut curves = Vec::with_capacity(strategy.stint_lengths.len());
        for (index, &length) in strategy.stint_lengths.iter().enumerate() {
            let start_lap = next_lap;
            next_lap = next_lap.saturating_add(length);
            if start_lap > total_laps {
                trace!(index, start_lap, total_laps, "skip stint past race end");
                continue;
            }

            let lap_times = (0..length)
                .map(|i| baseline + f64::from(i) * step)
                .collect();
            let tyre_life = (0..length).map(|i| linear_tyre_life(i, length)).collect();
            let compound = strategy
                .compounds
                .get(index)
                .cloned()
                .unwrap_or_else(|| self.defaults.default_compound.clone());

            curves.push(StintCurve {
                compound,
                start_lap,
                end_lap: start_lap.saturating_add(length).saturating_sub(1),
                lap_time_data: lap_times,
                tyre_life_data: tyre_life,
                degradation_data: Vec::new(),
            });
        }
        curves
    }

    #[must_use]
    pub fn baseline_lap_time(&self, expected_time: f64, total_laps: u32) -> f64 {
        if expected_time.is_finite() && expected_time > 0.0 && total_laps > 0 {
            expected_time / f64::from(total_laps)
        } else {
            self.defaults.fallback_baseline_s
        }
    }
}

fn linear_tyre_life(index: u32, length: u32) -> f64 {
    if length <= 1 {
        return 100.0;
    }
    100.0 - (f64::from(index) / f64::from(length - 1)) * 100.0
}

fn samples_for_curve(curve: &StintCurve, total_laps: u32) -> Vec<Sample> {
    let tyre_life = curve.tyre_life();
    curve
        .lap_time_data
        .iter()
        .enumerate()
        .filter_map(|(index, &lap_time)| {
            let offset = u32::try_from(index).ok()?;
            let lap = curve.start_lap.checked_add(offset)?;
            if lap < 1 || lap > total_laps || !lap_time.is_finite() {
                return None;
            }
            Some(Sample {
                lap,
                compound: curve.compound.clone(),
                lap_time,
                tyre_life: tyre_life.get(index).copied().filter(|v| v.is_finite()),
            })
        })
        .collect()
}
