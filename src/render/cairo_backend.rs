use std::f64::consts::TAU;
use std::io::Write;

use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use pango::FontDescription;
use tracing::trace;

use crate::error::{CurveError, CurveResult};
use crate::render::{
    CirclePrimitive, ClipRect, Color, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame,
    Renderer, TextHAlign, TextPrimitive,
};

/// Dashboard card background the offscreen surface is cleared to.
const DEFAULT_BACKGROUND: Color = Color::rgb(0.082, 0.094, 0.114);

/// Primitive counts of the last painted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can paint into a Cairo context owned by the host toolkit.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> CurveResult<()>;
}

/// Cairo + Pango backend for strategy charts.
///
/// `Renderer::render` paints into an owned offscreen surface, which can be
/// exported with [`CairoRenderer::write_png`]. When the surface is larger than
/// the frame viewport (HiDPI exports) the frame is scaled up uniformly.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    background: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> CurveResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(CurveError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            background: DEFAULT_BACKGROUND,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_background(&mut self, color: Color) -> CurveResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png<W: Write>(&self, writer: &mut W) -> CurveResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| CurveError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn paint_frame(&mut self, context: &Context, frame: &RenderFrame) -> CurveResult<()> {
        frame.validate()?;

        set_source(context, self.background);
        context
            .paint()
            .map_err(|err| backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        with_clip(context, frame.plot_clip, || {
            for rect in &frame.rects {
                fill_rect(context, rect)?;
                stats.rects_drawn += 1;
            }
            Ok(())
        })?;
        for line in &frame.lines {
            stroke_line(context, line)?;
            stats.lines_drawn += 1;
        }
        with_clip(context, frame.plot_clip, || {
            for polyline in &frame.polylines {
                if stroke_polyline(context, polyline)? {
                    stats.polylines_drawn += 1;
                }
            }
            for circle in &frame.circles {
                fill_circle(context, circle)?;
                stats.circles_drawn += 1;
            }
            Ok(())
        })?;
        for text in &frame.texts {
            show_text(context, text);
            stats.texts_drawn += 1;
        }

        trace!(?stats, "cairo frame painted");
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> CurveResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| backend_error("failed to create cairo context", err))?;
        let scale = surface_scale(&self.surface, frame);
        if scale > 1.0 {
            context.scale(scale, scale);
        }
        self.paint_frame(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> CurveResult<()> {
        self.paint_frame(context, frame)
    }
}

fn surface_scale(surface: &ImageSurface, frame: &RenderFrame) -> f64 {
    let sx = f64::from(surface.width()) / f64::from(frame.viewport.width.max(1));
    let sy = f64::from(surface.height()) / f64::from(frame.viewport.height.max(1));
    sx.min(sy)
}

/// Runs `paint` with the context clipped to `clip`, restoring the previous
/// clip afterwards.
fn with_clip<F>(context: &Context, clip: Option<ClipRect>, paint: F) -> CurveResult<()>
where
    F: FnOnce() -> CurveResult<()>,
{
    let Some(clip) = clip else {
        return paint();
    };
    context
        .save()
        .map_err(|err| backend_error("failed to save cairo state", err))?;
    context.rectangle(clip.x, clip.y, clip.width, clip.height);
    context.clip();
    let painted = paint();
    context
        .restore()
        .map_err(|err| backend_error("failed to restore cairo state", err))?;
    painted
}

fn fill_rect(context: &Context, rect: &RectPrimitive) -> CurveResult<()> {
    set_source(context, rect.fill_color);
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    context
        .fill()
        .map_err(|err| backend_error("failed to fill pit window band", err))
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> CurveResult<()> {
    set_source(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| backend_error("failed to stroke line", err))
}

/// Returns `false` for an empty path, which paints nothing.
fn stroke_polyline(context: &Context, polyline: &PolylinePrimitive) -> CurveResult<bool> {
    let Some((&(x0, y0), rest)) = polyline.points.split_first() else {
        return Ok(false);
    };
    set_source(context, polyline.color);
    context.set_line_width(polyline.stroke_width);
    context.set_line_cap(LineCap::Round);
    context.set_line_join(LineJoin::Round);
    context.move_to(x0, y0);
    for &(x, y) in rest {
        context.line_to(x, y);
    }
    let stroked = context
        .stroke()
        .map_err(|err| backend_error("failed to stroke stint path", err));
    context.set_line_cap(LineCap::Butt);
    context.set_line_join(LineJoin::Miter);
    stroked.map(|()| true)
}

fn fill_circle(context: &Context, circle: &CirclePrimitive) -> CurveResult<()> {
    set_source(context, circle.fill_color);
    context.new_sub_path();
    context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
    context
        .fill()
        .map_err(|err| backend_error("failed to fill hover marker", err))
}

fn show_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font));
    layout.set_text(&text.text);

    let width = f64::from(layout.pixel_size().0);
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - width / 2.0,
        TextHAlign::Right => text.x - width,
    };
    set_source(context, text.color);
    context.move_to(x, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

fn set_source(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn backend_error(prefix: &str, err: cairo::Error) -> CurveError {
    CurveError::InvalidData(format!("{prefix}: {err}"))
}
