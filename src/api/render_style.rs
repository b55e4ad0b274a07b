use crate::error::{CurveError, CurveResult};
use crate::render::Color;

/// Non-compound colors and stroke sizes of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub grid_line_color: Color,
    pub axis_line_color: Color,
    pub axis_label_color: Color,
    pub hover_marker_color: Color,
    pub tooltip_text_color: Color,
    pub grid_line_width: f64,
    pub axis_line_width: f64,
    pub stint_line_width: f64,
    pub font_size_px: f64,
    pub y_axis_caption: &'static str,
    pub x_axis_caption: &'static str,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            grid_line_color: Color::rgba(1.0, 1.0, 1.0, 0.08),
            axis_line_color: Color::rgba(1.0, 1.0, 1.0, 0.35),
            axis_label_color: Color::rgb8(0x9a, 0xa3, 0xad),
            hover_marker_color: Color::rgb(1.0, 1.0, 1.0),
            tooltip_text_color: Color::rgb8(0xe6, 0xea, 0xef),
            grid_line_width: 1.0,
            axis_line_width: 1.0,
            stint_line_width: 2.5,
            font_size_px: 10.0,
            y_axis_caption: "Lap time (s)",
            x_axis_caption: "Lap",
        }
    }
}

impl SceneStyle {
    pub fn validate(self) -> CurveResult<()> {
        for color in [
            self.grid_line_color,
            self.axis_line_color,
            self.axis_label_color,
            self.hover_marker_color,
            self.tooltip_text_color,
        ] {
            color.validate()?;
        }
        for (name, width) in [
            ("grid", self.grid_line_width),
            ("axis", self.axis_line_width),
            ("stint", self.stint_line_width),
            ("font", self.font_size_px),
        ] {
            if !width.is_finite() || width <= 0.0 {
                return Err(CurveError::InvalidConfig(format!(
                    "{name} size must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}
