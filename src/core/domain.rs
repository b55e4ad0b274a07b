use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CurveDataBuilder, DomainBounds, Strategy, ValueDomain};
use crate::error::{CurveError, CurveResult};

/// Where a chart's vertical range comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DomainSource {
    /// Range shared across sibling charts; used verbatim when valid.
    Provided(DomainBounds),
    /// Range derived from the chart's own samples.
    #[default]
    ComputeFromData,
}

impl DomainSource {
    #[must_use]
    pub const fn provided(min: f64, max: f64) -> Self {
        Self::Provided(DomainBounds::new(min, max))
    }
}

/// Which branch produced a resolved domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainOrigin {
    Provided,
    Data,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDomain {
    pub domain: ValueDomain,
    pub origin: DomainOrigin,
}

/// Tuning for data-derived domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainTuning {
    /// Fraction of the span added above and below the data.
    pub padding_ratio: f64,
    /// Smallest span the padding is computed from.
    pub min_span: f64,
    pub fallback: ValueDomain,
}

impl Default for DomainTuning {
    fn default() -> Self {
        Self {
            padding_ratio: 0.05,
            min_span: 0.5,
            fallback: ValueDomain::FALLBACK,
        }
    }
}

impl DomainTuning {
    pub fn validate(self) -> CurveResult<Self> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(CurveError::InvalidConfig(
                "domain padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_span.is_finite() || self.min_span <= 0.0 {
            return Err(CurveError::InvalidConfig(
                "domain min span must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Picks the vertical lap-time range for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DomainResolver {
    tuning: DomainTuning,
}

impl DomainResolver {
    #[must_use]
    pub fn new(tuning: DomainTuning) -> Self {
        Self { tuning }
    }

    #[must_use]
    pub fn tuning(&self) -> DomainTuning {
        self.tuning
    }

    #[must_use]
    pub fn resolve<I>(&self, source: DomainSource, values: I) -> ValueDomain
    where
        I: IntoIterator<Item = f64>,
    {
        self.resolve_detailed(source, values).domain
    }

    /// Uses a valid provided range verbatim, otherwise derives one from `values`.
    #[must_use]
    pub fn resolve_detailed<I>(&self, source: DomainSource, values: I) -> ResolvedDomain
    where
        I: IntoIterator<Item = f64>,
    {
        if let DomainSource::Provided(bounds) = source {
            match ValueDomain::try_from(bounds) {
                Ok(domain) => {
                    return ResolvedDomain {
                        domain,
                        origin: DomainOrigin::Provided,
                    };
                }
                Err(err) => {
                    debug!(error = %err, "provided domain rejected, computing from data");
                }
            }
        }
        self.from_values_detailed(values)
    }

    #[must_use]
    pub fn from_values<I>(&self, values: I) -> ValueDomain
    where
        I: IntoIterator<Item = f64>,
    {
        self.from_values_detailed(values).domain
    }

    fn from_values_detailed<I>(&self, values: I) -> ResolvedDomain
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }

        // Covers empty input and a single distinct value.
        if !min.is_finite() || !max.is_finite() || max <= min {
            debug!(min, max, "degenerate lap-time range, using fallback domain");
            return self.fallback();
        }

        match self.padded(min, max) {
            Ok(domain) => ResolvedDomain {
                domain,
                origin: DomainOrigin::Data,
            },
            Err(err) => {
                debug!(error = %err, "padded domain invalid, using fallback domain");
                self.fallback()
            }
        }
    }

    /// One domain over every sibling strategy's samples so a row shares its scale.
    ///
    /// The row range is always padded around the data, using `min_span` when
    /// every lap time is identical. Returns `ComputeFromData` when no strategy
    /// yields a finite lap time.
    #[must_use]
    pub fn shared_for<S>(
        &self,
        builder: &CurveDataBuilder,
        strategies: &[S],
        total_laps: u32,
    ) -> DomainSource
    where
        S: Borrow<Strategy>,
    {
        let (min, max) = strategies
            .iter()
            .flat_map(|strategy| {
                builder
                    .build(strategy.borrow(), total_laps)
                    .lap_times()
                    .collect::<Vec<_>>()
            })
            .filter(|value| value.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
                (lo.min(value), hi.max(value))
            });
        if !min.is_finite() || !max.is_finite() {
            return DomainSource::ComputeFromData;
        }

        match self.padded(min, max) {
            Ok(domain) => {
                debug!(
                    strategies = strategies.len(),
                    min = domain.min(),
                    max = domain.max(),
                    "resolved shared row domain"
                );
                DomainSource::Provided(domain.into())
            }
            Err(err) => {
                debug!(error = %err, "shared row domain invalid, charts compute their own");
                DomainSource::ComputeFromData
            }
        }
    }

    fn padded(&self, min: f64, max: f64) -> CurveResult<ValueDomain> {
        let margin = (max - min).max(self.tuning.min_span) * self.tuning.padding_ratio;
        ValueDomain::new(min - margin, max + margin)
    }

    fn fallback(&self) -> ResolvedDomain {
        ResolvedDomain {
            domain: self.tuning.fallback,
            origin: DomainOrigin::Fallback,
        }
    }
}
