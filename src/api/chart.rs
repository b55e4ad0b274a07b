use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::{
    DomainSource, HoverReadout, LayoutHost, SizeTracker, Strategy, ViewportSize,
    surface_x_from_client,
};
use crate::error::CurveResult;
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::build_render_frame;
use super::{
    CompoundPalette, CurveChartConfig, CurveScene, CurveSceneBuilder, CurveSceneState, DataModel,
    InvalidationLevel, SceneStyle,
};

type SelectCallback = Box<dyn FnMut(&str)>;

/// One strategy chart: owns its inputs, memoized derivations and hover state.
///
/// Derived data is cached by input identity. Swapping in a different
/// `Rc<Strategy>` (pointer identity), lap count or domain source rebuilds the
/// samples; a viewport change only relayouts; pointer movement only touches
/// the hover marker.
pub struct CurveChart<R: Renderer> {
    renderer: R,
    builder: CurveSceneBuilder,
    palette: CompoundPalette,
    style: SceneStyle,
    strategy: Rc<Strategy>,
    selection_index: usize,
    total_laps: u32,
    domain_source: DomainSource,
    viewport: ViewportSize,
    selected: bool,
    pointer_x: Option<f64>,
    on_select: Option<SelectCallback>,
    data: Option<DataModel>,
    geometry: Option<CurveSceneState>,
    pending: InvalidationLevel,
}

impl<R: Renderer> fmt::Debug for CurveChart<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveChart")
            .field("strategy", &self.strategy.kind)
            .field("total_laps", &self.total_laps)
            .field("viewport", &self.viewport)
            .field("selected", &self.selected)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> CurveChart<R> {
    pub fn new(
        renderer: R,
        config: CurveChartConfig,
        strategy: Rc<Strategy>,
        total_laps: u32,
    ) -> CurveResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            builder: CurveSceneBuilder::from_config(&config),
            palette: CompoundPalette::default(),
            style: SceneStyle::default(),
            strategy,
            selection_index: 0,
            total_laps,
            domain_source: DomainSource::ComputeFromData,
            viewport: ViewportSize::default(),
            selected: false,
            pointer_x: None,
            on_select: None,
            data: None,
            geometry: None,
            pending: InvalidationLevel::Data,
        })
    }

    /// Position of this strategy in its row, used for the fallback selection key.
    #[must_use]
    pub fn with_selection_index(mut self, index: usize) -> Self {
        self.selection_index = index;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: CompoundPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_style(mut self, style: SceneStyle) -> CurveResult<Self> {
        style.validate()?;
        self.style = style;
        Ok(self)
    }

    /// Registers the callback invoked with the selection key on activation.
    #[must_use]
    pub fn on_select(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn strategy(&self) -> &Rc<Strategy> {
        &self.strategy
    }

    #[must_use]
    pub fn selection_key(&self) -> String {
        self.strategy.selection_key(self.selection_index)
    }

    #[must_use]
    pub fn total_laps(&self) -> u32 {
        self.total_laps
    }

    #[must_use]
    pub fn domain_source(&self) -> DomainSource {
        self.domain_source
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationLevel {
        self.pending
    }

    pub fn set_strategy(&mut self, strategy: Rc<Strategy>) {
        if Rc::ptr_eq(&self.strategy, &strategy) {
            return;
        }
        debug!(strategy = %strategy.kind, "replace strategy");
        self.strategy = strategy;
        self.invalidate(InvalidationLevel::Data);
    }

    pub fn set_total_laps(&mut self, total_laps: u32) {
        if self.total_laps == total_laps {
            return;
        }
        debug!(total_laps, "replace total laps");
        self.total_laps = total_laps;
        self.invalidate(InvalidationLevel::Data);
    }

    pub fn set_domain_source(&mut self, source: DomainSource) {
        if self.domain_source == source {
            return;
        }
        debug!(?source, "replace domain source");
        self.domain_source = source;
        self.invalidate(InvalidationLevel::Data);
    }

    /// Accepts any size; unusable sizes yield the loading placeholder.
    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        if self.viewport == viewport {
            return;
        }
        trace!(width = viewport.width, height = viewport.height, "viewport changed");
        self.viewport = viewport;
        self.invalidate(InvalidationLevel::Layout);
    }

    /// Pulls the latest observed size from a tracker.
    pub fn sync_viewport<H: LayoutHost>(&mut self, tracker: &SizeTracker<H>) {
        self.set_viewport(tracker.size());
    }

    pub fn set_selected(&mut self, selected: bool) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
        self.invalidate(InvalidationLevel::Layout);
    }

    pub fn set_palette(&mut self, palette: CompoundPalette) {
        if self.palette == palette {
            return;
        }
        self.palette = palette;
        self.invalidate(InvalidationLevel::Layout);
    }

    /// Pointer moved to `x` in surface pixels. Returns the tooltip payload.
    pub fn pointer_move(&mut self, x: f64) -> Option<HoverReadout> {
        self.pointer_x = x.is_finite().then_some(x);
        self.invalidate(InvalidationLevel::Cursor);
        let pointer_x = self.pointer_x?;
        self.refresh();
        let scene = self.ready_scene()?;
        self.builder
            .hover_marker(scene, pointer_x)
            .map(|marker| marker.readout)
    }

    /// Pointer moved in host client space over a box at `bounding_left` of
    /// width `bounding_width`.
    pub fn pointer_move_client(
        &mut self,
        client_x: f64,
        bounding_left: f64,
        bounding_width: f64,
    ) -> Option<HoverReadout> {
        let x = surface_x_from_client(client_x, bounding_left, bounding_width, self.viewport)?;
        self.pointer_move(x)
    }

    pub fn pointer_leave(&mut self) {
        if self.pointer_x.take().is_some() {
            self.invalidate(InvalidationLevel::Cursor);
        }
    }

    /// Click or keyboard confirm. Returns the reported key, if the chart is interactive.
    pub fn activate(&mut self) -> Option<String> {
        self.refresh();
        self.ready_scene()?;
        let key = self.selection_key();
        debug!(key = %key, "strategy chart activated");
        if let Some(callback) = self.on_select.as_mut() {
            callback(&key);
        }
        Some(key)
    }

    /// Activates on `Enter` or space, the keys a focused chart card answers to.
    pub fn key_press(&mut self, key: &str) -> Option<String> {
        match key {
            "Enter" | " " => self.activate(),
            _ => None,
        }
    }

    /// Current scene including the hover marker.
    pub fn scene(&mut self) -> CurveSceneState {
        self.refresh();
        let pointer_x = self.pointer_x;
        let mut state = self.geometry.clone().unwrap_or(CurveSceneState::NoData);
        if let (CurveSceneState::Ready(scene), Some(pointer_x)) = (&mut state, pointer_x) {
            let hover = self.builder.hover_marker(scene, pointer_x);
            scene.hover = hover;
        }
        state
    }

    #[must_use]
    pub fn build_render_frame(&mut self) -> Option<RenderFrame> {
        let style = self.style;
        self.scene()
            .as_ready()
            .map(|scene| build_render_frame(scene, &style))
    }

    /// Renders the current scene. Placeholder states draw nothing.
    pub fn render(&mut self) -> CurveResult<()> {
        if let Some(frame) = self.build_render_frame() {
            self.renderer.render(&frame)?;
        }
        self.pending = InvalidationLevel::None;
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn invalidate(&mut self, level: InvalidationLevel) {
        match level {
            InvalidationLevel::Data => {
                self.data = None;
                self.geometry = None;
            }
            InvalidationLevel::Layout => self.geometry = None,
            InvalidationLevel::Cursor | InvalidationLevel::None => {}
        }
        self.pending = self.pending.max(level);
    }

    fn ready_scene(&self) -> Option<&CurveScene> {
        self.geometry.as_ref().and_then(CurveSceneState::as_ready)
    }

    fn refresh(&mut self) {
        if self.data.is_none() {
            self.data = Some(self.builder.build_data(
                &self.strategy,
                self.total_laps,
                self.domain_source,
            ));
        }
        if self.geometry.is_none() {
            let state = match self.data.as_ref() {
                Some(data) => self.builder.build_geometry_or_placeholder(
                    data,
                    &self.strategy,
                    self.total_laps,
                    self.viewport,
                    &self.palette,
                    self.selected,
                ),
                None => CurveSceneState::NoData,
            };
            self.geometry = Some(state);
        }
    }
}
