//! Strategy payloads consumed from the strategy service.
//!
//! These types mirror the service JSON (snake_case keys) and stay immutable
//! once handed to a chart.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CurveError, CurveResult};

/// Race length used when the service omits the race context.
pub const DEFAULT_TOTAL_LAPS: u32 = 60;

/// Tyre hardness class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Compound {
    Soft,
    #[default]
    Medium,
    Hard,
    Intermediate,
    Wet,
    /// Any tag the engine has no dedicated variant for, kept verbatim.
    Other(String),
}

impl Compound {
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "SOFT" => Self::Soft,
            "MEDIUM" => Self::Medium,
            "HARD" => Self::Hard,
            "INTERMEDIATE" => Self::Intermediate,
            "WET" => Self::Wet,
            _ => Self::Other(trimmed.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Soft => "SOFT",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
            Self::Intermediate => "INTERMEDIATE",
            Self::Wet => "WET",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Compound {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<&str> for Compound {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<Compound> for String {
    fn from(compound: Compound) -> Self {
        compound.as_str().to_owned()
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admissible lap range for one pit stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PitWindow {
    #[serde(default)]
    pub lap_min: u32,
    #[serde(default)]
    pub lap_max: u32,
}

impl PitWindow {
    #[must_use]
    pub const fn new(lap_min: u32, lap_max: u32) -> Self {
        Self { lap_min, lap_max }
    }
}

/// Fine-grained per-lap curve for one stint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StintCurve {
    #[serde(default)]
    pub compound: Compound,
    #[serde(default)]
    pub start_lap: u32,
    #[serde(default)]
    pub end_lap: u32,
    #[serde(default, alias = "lapTimeData", deserialize_with = "nullable_f64_vec")]
    pub lap_time_data: Vec<f64>,
    #[serde(
        default,
        alias = "tyreLifeData",
        deserialize_with = "nullable_f64_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tyre_life_data: Vec<f64>,
    /// Older payloads carry tyre life under this name.
    #[serde(
        default,
        alias = "degradationData",
        deserialize_with = "nullable_f64_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub degradation_data: Vec<f64>,
}

impl StintCurve {
    #[must_use]
    pub fn new(
        compound: impl Into<Compound>,
        start_lap: u32,
        lap_time_data: Vec<f64>,
        tyre_life_data: Vec<f64>,
    ) -> Self {
        let len = u32::try_from(lap_time_data.len()).unwrap_or(u32::MAX);
        Self {
            compound: compound.into(),
            start_lap,
            end_lap: start_lap.saturating_add(len.saturating_sub(1)),
            lap_time_data,
            tyre_life_data,
            degradation_data: Vec::new(),
        }
    }

    /// Tyre-life series, preferring the current field over the legacy one.
    #[must_use]
    pub fn tyre_life(&self) -> &[f64] {
        if self.tyre_life_data.is_empty() {
            &self.degradation_data
        } else {
            &self.tyre_life_data
        }
    }
}

/// One candidate pit-stop strategy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Strategy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_id: Option<String>,
    /// Strategy kind tag such as `one-stop`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Expected total race time in seconds.
    #[serde(default, deserialize_with = "nullable_f64")]
    pub expected_time: f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub variance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(rename = "stints", default)]
    pub stint_lengths: Vec<u32>,
    #[serde(default)]
    pub compounds: Vec<Compound>,
    #[serde(default)]
    pub stop_laps: Vec<u32>,
    #[serde(default)]
    pub pit_windows: Vec<PitWindow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stint_curves: Vec<StintCurve>,
}

impl Strategy {
    pub fn from_json_str(input: &str) -> CurveResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| CurveError::Parse(format!("failed to parse strategy json: {e}")))
    }

    #[must_use]
    pub fn has_stint_curves(&self) -> bool {
        !self.stint_curves.is_empty()
    }

    /// Identifier reported when the strategy's chart is activated.
    ///
    /// Falls back to `{kind}-{expected_time}-{index}` when the service sent no id.
    #[must_use]
    pub fn selection_key(&self, index: usize) -> String {
        match self.strategy_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => format!("{}-{}-{}", self.kind, self.expected_time, index),
        }
    }

    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stop_laps.len()
    }
}

/// Race-level context sent alongside the strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceContext {
    #[serde(default = "default_total_laps")]
    pub total_laps: u32,
    #[serde(default)]
    pub track_temp: Option<f64>,
    #[serde(default)]
    pub air_temp: Option<f64>,
    #[serde(default)]
    pub pit_loss: Option<f64>,
    #[serde(default)]
    pub sc_probability: Option<f64>,
}

impl Default for RaceContext {
    fn default() -> Self {
        Self {
            total_laps: DEFAULT_TOTAL_LAPS,
            track_temp: None,
            air_temp: None,
            pit_loss: None,
            sc_probability: None,
        }
    }
}

fn default_total_laps() -> u32 {
    DEFAULT_TOTAL_LAPS
}

/// Per-compound linear pace summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompoundDegradation {
    #[serde(default, deserialize_with = "nullable_f64")]
    pub base: f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub slope: f64,
    #[serde(default, deserialize_with = "nullable_f64_vec")]
    pub curve: Vec<f64>,
}

/// Full strategy-service response for one `(season, circuit, driver)` request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategySet {
    #[serde(default)]
    pub context: RaceContext,
    #[serde(default)]
    pub strategies: Vec<Strategy>,
    #[serde(default)]
    pub degradation: IndexMap<Compound, CompoundDegradation>,
}

impl StrategySet {
    pub fn from_json_str(input: &str) -> CurveResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| CurveError::Parse(format!("failed to parse strategy set json: {e}")))
    }

    /// Total laps, treating a zero count as missing.
    #[must_use]
    pub fn total_laps(&self) -> u32 {
        if self.context.total_laps == 0 {
            DEFAULT_TOTAL_LAPS
        } else {
            self.context.total_laps
        }
    }
}

fn nullable_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn nullable_f64_vec<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<f64>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}
