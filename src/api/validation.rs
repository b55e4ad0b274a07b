use crate::error::{CurveError, CurveResult};

use super::CurveChartConfig;

pub(super) fn validate_chart_config(config: &CurveChartConfig) -> CurveResult<()> {
    config.padding.validate()?;
    config.size_tracker_config().validate()?;
    config.domain.validate()?;
    validate_synthesis(config)?;

    if !config.pit_window_min_width_px.is_finite() || config.pit_window_min_width_px <= 0.0 {
        return Err(CurveError::InvalidConfig(
            "pit window min width must be finite and > 0".to_owned(),
        ));
    }
    if config.axis_tick_count < 2 {
        return Err(CurveError::InvalidConfig(
            "axis tick count must be >= 2".to_owned(),
        ));
    }
    if let Some(fraction) = config
        .lap_gridline_fractions
        .iter()
        .find(|fraction| !fraction.is_finite() || **fraction <= 0.0 || **fraction >= 1.0)
    {
        return Err(CurveError::InvalidConfig(format!(
            "lap gridline fraction {fraction} must be in (0, 1)"
        )));
    }
    if !config.hover_marker_radius_px.is_finite() || config.hover_marker_radius_px <= 0.0 {
        return Err(CurveError::InvalidConfig(
            "hover marker radius must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

fn validate_synthesis(config: &CurveChartConfig) -> CurveResult<()> {
    let synthesis = &config.synthesis;
    if !synthesis.fallback_baseline_s.is_finite() || synthesis.fallback_baseline_s <= 0.0 {
        return Err(CurveError::InvalidConfig(
            "fallback baseline lap time must be finite and > 0".to_owned(),
        ));
    }
    if !synthesis.degradation_step_s.is_finite() {
        return Err(CurveError::InvalidConfig(
            "synthesized degradation step must be finite".to_owned(),
        ));
    }
    Ok(())
}
