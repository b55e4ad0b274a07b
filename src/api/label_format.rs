//! Text shown in chart headers, axis ticks and the hover tooltip.

use crate::core::PitWindowRect;

/// `90.123s`, or `-` when the value is not finite.
#[must_use]
pub fn format_lap_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "-".to_owned();
    }
    format!("{seconds:.3}s")
}

/// Race duration as `h:mm:ss`, or `m:ss` under one hour.
///
/// Negative and non-finite inputs read as zero.
#[must_use]
pub fn format_race_duration(total_seconds: f64) -> String {
    let safe = if total_seconds.is_finite() {
        total_seconds.round().max(0.0)
    } else {
        0.0
    };
    let safe = safe.min(u64::MAX as f64) as u64;
    let hours = safe / 3600;
    let minutes = (safe % 3600) / 60;
    let seconds = safe % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[must_use]
pub fn format_variance(variance: f64) -> String {
    let value = if variance.is_finite() { variance } else { 0.0 };
    format!("var {value:.1}")
}

#[must_use]
pub fn format_tyre_life(percent: f64) -> String {
    format!("Tyre {percent:.1}%")
}

#[must_use]
pub fn format_axis_value(seconds: f64) -> String {
    format!("{seconds:.1}")
}

#[must_use]
pub fn format_pit_window(window: Option<&PitWindowRect>) -> String {
    match window {
        Some(window) => format!("Pit window: {}-{}", window.lap_min, window.lap_max),
        None => "Outside pit window".to_owned(),
    }
}
