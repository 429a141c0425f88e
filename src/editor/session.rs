//! One editing session: base image, overlay model, gesture controller and drawing surface.
//!
//! Every public handler mutates through [`OverlayModel`] and then presents at most once, so a
//! pointer move that touches the model costs exactly one repaint.

use crate::assets::decode::BaseImage;
use crate::assets::loader::{ImageSource, LoadTicket, LoadTracker};
use crate::config::EditorConfig;
use crate::editor::gesture::{Controller, Gesture, GestureCtx, Mode, PointerEvent};
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::foundation::mapper::{DisplayScale, to_image_space, to_screen_space};
use crate::model::overlay::{OverlayEdit, OverlayModel, StrokeStyle, TextOverlay};
use crate::render::FrameRGBA;
use crate::render::cpu::{CpuRenderer, RenderStats, RenderStyle};
use crate::render::export;
use crate::render::hit::BoxGeometry;
use crate::render::text::{FixedAdvanceMeasure, FontTextEngine, TextMeasure};

/// What happened to a finished load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image replaced the previous base image.
    Installed,
    /// A newer load superseded this one; nothing changed.
    Discarded,
}

/// Interactive annotation session.
pub struct Editor {
    config: EditorConfig,
    model: OverlayModel,
    controller: Controller,
    renderer: CpuRenderer,
    measure: Box<dyn TextMeasure>,
    loads: LoadTracker,
    image: Option<BaseImage>,
    container_width: Option<f64>,
    scale: DisplayScale,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("mode", &self.controller.mode())
            .field("gesture", &self.controller.gesture())
            .field("image", &self.image)
            .field("scale", &self.scale)
            .field("overlays", &self.model.overlays().len())
            .field("strokes", &self.model.strokes().len())
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Session using the font from `config.font_path`, or a fixed-advance measurer when no font
    /// is configured.
    pub fn new(config: EditorConfig) -> ThumbResult<Self> {
        let measure: Box<dyn TextMeasure> = match &config.font_path {
            Some(path) => {
                let engine = FontTextEngine::from_path(path)?;
                tracing::debug!(family = engine.family_name(), "label font loaded");
                Box::new(engine)
            }
            None => Box::new(FixedAdvanceMeasure::default()),
        };
        Self::with_measure(config, measure)
    }

    /// Session with an injected text measurer.
    pub fn with_measure(config: EditorConfig, measure: Box<dyn TextMeasure>) -> ThumbResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            model: OverlayModel::new(),
            controller: Controller::new(),
            renderer: CpuRenderer::new(),
            measure,
            loads: LoadTracker::new(),
            image: None,
            container_width: None,
            scale: DisplayScale::IDENTITY,
        })
    }

    /// Active settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Labels, strokes and selection.
    pub fn model(&self) -> &OverlayModel {
        &self.model
    }

    /// Active mode.
    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// What the pointer is doing.
    pub fn gesture(&self) -> Gesture {
        self.controller.gesture()
    }

    /// Current base image.
    pub fn image(&self) -> Option<&BaseImage> {
        self.image.as_ref()
    }

    /// `true` while the latest load has neither completed nor failed.
    pub fn is_loading(&self) -> bool {
        self.loads.is_pending()
    }

    /// Current screen/image ratio.
    pub fn display_scale(&self) -> DisplayScale {
        self.scale
    }

    // ---- loading ----

    /// Start loading a new base image. Any gesture in progress is aborted.
    pub fn begin_load(&mut self, source: ImageSource) -> ThumbResult<LoadTicket> {
        let ticket = self.loads.begin(source)?;
        self.controller.abort(&mut self.model);
        tracing::debug!(generation = ticket.generation(), "image load started");
        Ok(ticket)
    }

    /// Deliver the fetched bytes for `ticket`.
    ///
    /// Superseded tickets are discarded without touching the session. A decode failure leaves
    /// the previous image, labels and strokes intact.
    pub fn complete_load(&mut self, ticket: &LoadTicket, bytes: &[u8]) -> ThumbResult<LoadOutcome> {
        let image = match self.loads.complete(ticket, bytes) {
            Ok(image) => image,
            Err(err) if err.is_stale() => {
                tracing::debug!(error = %err, "discarding stale image load");
                return Ok(LoadOutcome::Discarded);
            }
            Err(err) => return Err(err),
        };
        self.controller.abort(&mut self.model);
        self.scale = self.fit_scale(image.width())?;
        self.renderer.discard_frame();
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            scale = self.scale.get(),
            "base image installed"
        );
        self.image = Some(image);
        self.model.request_render();
        self.present()?;
        Ok(LoadOutcome::Installed)
    }

    /// The fetch for `ticket` failed before producing bytes. Stale tickets are ignored.
    pub fn fail_load(&mut self, ticket: &LoadTicket) {
        if let Err(err) = self.loads.fail(ticket) {
            tracing::debug!(error = %err, "ignoring failure of superseded load");
        }
    }

    // ---- viewport & mode ----

    /// On-screen width of the drawing surface. Recomputes the display scale.
    pub fn set_container_width(&mut self, width: f64) -> ThumbResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ThumbError::invalid_input(format!(
                "container width must be finite and > 0, got {width}"
            )));
        }
        self.container_width = Some(width);
        if let Some(image) = &self.image {
            self.scale = DisplayScale::fit_width(width, image.width())?;
        }
        Ok(())
    }

    /// Image-space point back to screen space for the given surface origin.
    pub fn to_screen(&self, image_point: Point, origin: Point) -> Point {
        to_screen_space(image_point, origin, self.scale)
    }

    /// Switch between text and draw mode, ending any gesture in progress.
    pub fn set_mode(&mut self, mode: Mode) -> ThumbResult<()> {
        self.controller.set_mode(mode, &mut self.model);
        self.present()
    }

    // ---- pointer input ----
    //
    // `origin` is the surface's on-screen top-left for this event; `None` (surface not mounted)
    // and a missing base image both make the event a no-op.

    /// Button pressed at `screen`.
    pub fn pointer_down(&mut self, screen: Point, origin: Option<Point>) -> ThumbResult<()> {
        self.pointer_at(screen, origin, PointerEvent::Down)
    }

    /// Pointer moved to `screen`.
    pub fn pointer_move(&mut self, screen: Point, origin: Option<Point>) -> ThumbResult<()> {
        self.pointer_at(screen, origin, PointerEvent::Move)
    }

    /// Button released.
    pub fn pointer_up(&mut self) -> ThumbResult<()> {
        self.dispatch(PointerEvent::Up)
    }

    /// Pointer left the surface; ends the gesture exactly like [`Self::pointer_up`].
    pub fn pointer_leave(&mut self) -> ThumbResult<()> {
        self.dispatch(PointerEvent::Leave)
    }

    fn pointer_at(
        &mut self,
        screen: Point,
        origin: Option<Point>,
        event: fn(Point) -> PointerEvent,
    ) -> ThumbResult<()> {
        if self.image.is_none() {
            return Ok(());
        }
        let Some(p) = to_image_space(screen, origin, self.scale) else {
            return Ok(());
        };
        self.dispatch(event(p))
    }

    fn dispatch(&mut self, event: PointerEvent) -> ThumbResult<()> {
        let geometry = self.geometry();
        let stroke = self.stroke_style();
        let mut ctx = GestureCtx {
            model: &mut self.model,
            measure: self.measure.as_mut(),
            geometry,
            stroke,
        };
        self.controller.handle(event, &mut ctx);
        self.present()
    }

    // ---- overlays ----

    /// Add a label at the image center. Size and color fall back to the configured defaults;
    /// the size is clamped into the configured range.
    pub fn add_text_overlay(
        &mut self,
        text: &str,
        font_size: Option<u32>,
        color: Option<Rgba8>,
    ) -> ThumbResult<usize> {
        let center = self
            .image
            .as_ref()
            .map(BaseImage::center)
            .ok_or_else(|| ThumbError::invalid_input("load a base image before adding text"))?;
        let font_size = self
            .config
            .clamp_font_size(font_size.unwrap_or(self.config.default_font_size))?;
        let color = color.unwrap_or(self.config.default_text_color);
        let index = self.model.add_text_overlay(text, font_size, color, center)?;
        self.present()?;
        Ok(index)
    }

    /// See [`OverlayModel::move_overlay`] for the index contract.
    pub fn move_overlay(&mut self, index: usize, to: Point) -> ThumbResult<()> {
        self.model.move_overlay(index, to);
        self.present()
    }

    /// See [`OverlayModel::select`] for the index contract.
    pub fn select(&mut self, index: Option<usize>) -> ThumbResult<()> {
        self.model.select(index);
        self.present()
    }

    /// Restyle a label; a new font size is clamped like in [`Self::add_text_overlay`].
    pub fn edit_overlay(&mut self, index: usize, mut edit: OverlayEdit) -> ThumbResult<()> {
        if let Some(size) = edit.font_size {
            edit.font_size = Some(self.config.clamp_font_size(size)?);
        }
        self.model.edit_overlay(index, edit)?;
        self.present()
    }

    /// Delete one label. A drag in progress is aborted since indices shift; an out-of-range
    /// index removes nothing and leaves the gesture alone.
    pub fn remove_overlay(&mut self, index: usize) -> ThumbResult<Option<TextOverlay>> {
        if index < self.model.overlays().len()
            && matches!(self.controller.gesture(), Gesture::DraggingOverlay { .. })
        {
            self.controller.abort(&mut self.model);
        }
        let removed = self.model.remove_overlay(index);
        self.present()?;
        Ok(removed)
    }

    /// Drop every label and stroke. A gesture in progress is aborted.
    pub fn clear_all(&mut self) -> ThumbResult<()> {
        self.controller.abort(&mut self.model);
        self.model.clear_all();
        self.present()
    }

    // ---- surface ----

    /// Repaint unconditionally.
    pub fn render(&mut self) -> ThumbResult<()> {
        if self.image.is_none() {
            return Err(ThumbError::invalid_input("no base image loaded"));
        }
        self.model.request_render();
        self.present()
    }

    /// Copy of the last painted surface.
    pub fn frame(&self) -> Option<FrameRGBA> {
        self.renderer.frame()
    }

    /// Renderer work counters.
    pub fn render_stats(&self) -> RenderStats {
        self.renderer.stats()
    }

    /// PNG bytes of the last painted surface. Never repaints.
    pub fn export_png(&self) -> ThumbResult<Vec<u8>> {
        export::export_png(&self.last_frame()?)
    }

    /// `data:image/png;base64,...` of the last painted surface.
    pub fn export_data_url(&self) -> ThumbResult<String> {
        export::export_data_url(&self.last_frame()?)
    }

    /// File name the export is offered under.
    pub fn export_file_name(&self) -> &str {
        &self.config.export_file_name
    }

    fn last_frame(&self) -> ThumbResult<FrameRGBA> {
        self.renderer
            .frame()
            .ok_or_else(|| ThumbError::invalid_input("nothing has been rendered yet"))
    }

    fn present(&mut self) -> ThumbResult<()> {
        if !self.model.take_render_request() {
            return Ok(());
        }
        let style = self.render_style();
        let Some(image) = self.image.as_ref() else {
            return Ok(());
        };
        self.renderer
            .render(image, &self.model, self.measure.as_mut(), &style)
    }

    fn fit_scale(&self, image_width: u32) -> ThumbResult<DisplayScale> {
        match self.container_width {
            Some(w) => DisplayScale::fit_width(w, image_width),
            None => Ok(DisplayScale::IDENTITY),
        }
    }

    fn geometry(&self) -> BoxGeometry {
        BoxGeometry {
            padding: self.config.hit_padding,
            anchor: self.config.text_anchor,
        }
    }

    fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.config.stroke_color,
            width: self.config.stroke_width,
        }
    }

    fn render_style(&self) -> RenderStyle {
        RenderStyle {
            geometry: self.geometry(),
            selection_color: self.config.selection_color,
            selection_width: self.config.selection_width,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
