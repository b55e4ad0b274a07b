use crate::core::ViewportSize;
use crate::error::{CurveError, CurveResult};
use crate::render::{
    CirclePrimitive, ClipRect, LinePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive,
};

/// Backend-agnostic draw list for one chart pass, painted in field order.
///
/// When `plot_clip` is set, backends confine rects, polylines and circles to
/// it. Lines and texts are never clipped.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: ViewportSize,
    pub plot_clip: Option<ClipRect>,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            viewport,
            plot_clip: None,
            rects: Vec::new(),
            lines: Vec::new(),
            polylines: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_plot_clip(mut self, clip: ClipRect) -> Self {
        self.plot_clip = Some(clip);
        self
    }

    pub fn validate(&self) -> CurveResult<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(CurveError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if let Some(clip) = self.plot_clip {
            clip.validate()?;
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.lines.is_empty()
            && self.polylines.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }
}
