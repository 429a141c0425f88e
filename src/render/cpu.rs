//! CPU renderer: repaints the base image, strokes, labels and selection outline at native size.

use crate::assets::decode::{BaseImage, surface_dims};
use crate::config::TextAnchor;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::model::overlay::{OverlayModel, Stroke, TextOverlay};
use crate::render::FrameRGBA;
use crate::render::hit::{BoxGeometry, measure_bounds};
use crate::render::text::{ShapedText, TextMeasure};

/// Visual settings the renderer needs beyond the model itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    /// Label box geometry shared with the hit tester.
    pub geometry: BoxGeometry,
    /// Outline color of the selected label.
    pub selection_color: Rgba8,
    /// Outline width of the selected label.
    pub selection_width: f64,
}

/// Counters describing the renderer's work so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Full redraws performed.
    pub renders: u64,
    /// Labels painted by the last redraw.
    pub last_overlays: usize,
    /// Strokes (sealed + in progress) painted by the last redraw.
    pub last_strokes: usize,
}

/// Owner of the drawing surface.
///
/// The pixel buffer is always the base image's native size; any on-screen scaling is the
/// shell's concern. Every [`CpuRenderer::render`] repaints from scratch, so repeated calls with
/// the same inputs produce identical pixels.
#[derive(Default)]
pub struct CpuRenderer {
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
    stats: RenderStats,
    warned_unshaped: bool,
}

impl CpuRenderer {
    /// Renderer with no surface yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Work counters.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// `true` once a frame has been painted and not discarded since.
    pub fn has_frame(&self) -> bool {
        self.pixmap.is_some()
    }

    /// Drop the current surface contents (e.g. when the base image changes).
    pub fn discard_frame(&mut self) {
        self.pixmap = None;
    }

    /// Copy of the last painted surface.
    pub fn frame(&self) -> Option<FrameRGBA> {
        let pixmap = self.pixmap.as_ref()?;
        Some(FrameRGBA {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    /// Repaint: base image, then strokes in creation order, then labels in insertion order
    /// with the selected one outlined.
    pub fn render(
        &mut self,
        image: &BaseImage,
        model: &OverlayModel,
        measure: &mut dyn TextMeasure,
        style: &RenderStyle,
    ) -> ThumbResult<()> {
        let (w, h) = surface_dims(image.width(), image.height())?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        let mut pixmap = match self.pixmap.take() {
            Some(p) if p.width() == w && p.height() == h => p,
            _ => vello_cpu::Pixmap::new(w, h),
        };
        clear_pixmap_to_transparent(&mut pixmap);

        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(image.paint().clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));

        let mut strokes = 0usize;
        for stroke in model.strokes().iter().chain(model.pending_stroke()) {
            draw_stroke(&mut ctx, stroke);
            strokes += 1;
        }

        for (i, overlay) in model.overlays().iter().enumerate() {
            match measure.shape(&overlay.text, overlay.font_size, overlay.color)? {
                Some(shaped) => draw_label(&mut ctx, overlay, &shaped, style.geometry.anchor),
                None if !self.warned_unshaped => {
                    tracing::warn!("no font available; labels are outlined but not rasterized");
                    self.warned_unshaped = true;
                }
                None => {}
            }
            if model.is_selected(i) {
                let bounds = measure_bounds(overlay, measure, style.geometry);
                draw_outline(&mut ctx, bounds, style);
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        self.pixmap = Some(pixmap);

        self.stats.renders += 1;
        self.stats.last_overlays = model.overlays().len();
        self.stats.last_strokes = strokes;
        Ok(())
    }

    /// Native size of the last painted surface.
    pub fn surface_size(&self) -> ThumbResult<(u32, u32)> {
        let p = self
            .pixmap
            .as_ref()
            .ok_or_else(|| ThumbError::render("surface has not been painted"))?;
        Ok((u32::from(p.width()), u32::from(p.height())))
    }
}

fn draw_stroke(ctx: &mut vello_cpu::RenderContext, stroke: &Stroke) {
    let pts = stroke.points();
    let Some(&first) = pts.first() else {
        return;
    };
    let style = stroke.style();

    let mut path = vello_cpu::kurbo::BezPath::new();
    path.move_to(point_to_cpu(first));
    if pts.len() == 1 {
        // Zero-length segment so round caps leave a dot.
        path.line_to(point_to_cpu(first));
    }
    for &p in &pts[1..] {
        path.line_to(point_to_cpu(p));
    }

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color_to_cpu(style.color));
    ctx.set_stroke(
        vello_cpu::kurbo::Stroke::new(style.width)
            .with_join(vello_cpu::kurbo::Join::Round)
            .with_caps(vello_cpu::kurbo::Cap::Round),
    );
    ctx.stroke_path(&path);
}

fn draw_label(
    ctx: &mut vello_cpu::RenderContext,
    overlay: &TextOverlay,
    shaped: &ShapedText,
    anchor: TextAnchor,
) {
    let left = match anchor {
        TextAnchor::Center => overlay.x - shaped.width / 2.0,
        TextAnchor::Start => overlay.x,
    };
    let top = overlay.y - shaped.baseline;
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((left, top)));

    for run in &shaped.runs {
        let b = run.brush;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));
        let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
        ctx.glyph_run(&shaped.font)
            .font_size(run.font_size)
            .fill_glyphs(glyphs);
    }
}

fn draw_outline(ctx: &mut vello_cpu::RenderContext, bounds: Rect, style: &RenderStyle) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color_to_cpu(style.selection_color));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.selection_width));
    ctx.stroke_rect(&vello_cpu::kurbo::Rect::new(
        bounds.x0, bounds.y0, bounds.x1, bounds.y1,
    ));
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
