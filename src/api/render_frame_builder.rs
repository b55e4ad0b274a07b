use crate::render::{
    CirclePrimitive, ClipRect, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::{CurveScene, SceneStyle};

const TOOLTIP_LINE_HEIGHT_PX: f64 = 12.0;
const TOOLTIP_OFFSET_PX: f64 = 8.0;

/// Flattens a scene into backend draw commands.
///
/// Paint order: pit-window bands, grid, axes, stint paths, hover marker, text.
/// Stint paths and the hover marker follow the data unclamped, so the frame
/// clips them to the plot area.
#[must_use]
pub fn build_render_frame(scene: &CurveScene, style: &SceneStyle) -> RenderFrame {
    let area = scene.plot_area;
    let mut frame = RenderFrame::new(scene.viewport).with_plot_clip(ClipRect::new(
        area.left,
        area.top,
        area.width,
        area.height,
    ));

    for window in &scene.pit_windows {
        // Bands are clipped to the plot area.
        let left = window.x.max(area.left);
        let right = (window.x + window.width).min(area.right());
        if right > left {
            frame.rects.push(RectPrimitive::new(
                left,
                area.top,
                right - left,
                area.height,
                scene.pit_window_color,
            ));
        }
    }

    for tick in &scene.y_ticks {
        frame.lines.push(LinePrimitive::new(
            area.left,
            tick.y,
            area.right(),
            tick.y,
            style.grid_line_width,
            style.grid_line_color,
        ));
        frame.texts.push(TextPrimitive::new(
            tick.label.clone(),
            area.left - 4.0,
            tick.y - style.font_size_px / 2.0,
            style.font_size_px,
            style.axis_label_color,
            TextHAlign::Right,
        ));
    }
    for gridline in &scene.lap_gridlines {
        frame.lines.push(LinePrimitive::new(
            gridline.x,
            area.top,
            gridline.x,
            area.bottom(),
            style.grid_line_width,
            style.grid_line_color,
        ));
    }

    frame.lines.push(LinePrimitive::new(
        area.left,
        area.top,
        area.left,
        area.bottom(),
        style.axis_line_width,
        style.axis_line_color,
    ));
    frame.lines.push(LinePrimitive::new(
        area.left,
        area.bottom(),
        area.right(),
        area.bottom(),
        style.axis_line_width,
        style.axis_line_color,
    ));

    for stint in scene.stints.iter().filter(|stint| !stint.points.is_empty()) {
        frame.polylines.push(PolylinePrimitive::new(
            stint.points.clone(),
            style.stint_line_width,
            stint.color,
        ));
    }

    frame.texts.push(TextPrimitive::new(
        style.y_axis_caption,
        area.left + 4.0,
        (area.top - 2.0 - style.font_size_px).max(0.0),
        style.font_size_px,
        style.axis_label_color,
        TextHAlign::Left,
    ));
    frame.texts.push(TextPrimitive::new(
        style.x_axis_caption,
        area.right() - 4.0,
        f64::from(scene.viewport.height) - 6.0 - style.font_size_px,
        style.font_size_px,
        style.axis_label_color,
        TextHAlign::Right,
    ));

    if let Some(hover) = &scene.hover {
        let (x, y) = (hover.readout.x, hover.readout.y);
        frame.circles.push(CirclePrimitive::new(
            x,
            y,
            hover.radius,
            style.hover_marker_color,
        ));
        for (index, line) in hover.tooltip.lines.iter().enumerate() {
            frame.texts.push(TextPrimitive::new(
                line.clone(),
                x + TOOLTIP_OFFSET_PX,
                y + TOOLTIP_OFFSET_PX + index as f64 * TOOLTIP_LINE_HEIGHT_PX,
                style.font_size_px,
                style.tooltip_text_color,
                TextHAlign::Left,
            ));
        }
    }

    frame
}
