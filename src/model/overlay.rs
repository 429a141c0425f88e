//! The overlay model: ordered text labels and ink strokes in image space.
//!
//! All mutation of labels and strokes goes through [`OverlayModel`]. Every mutating call marks
//! the model as needing a redraw; the session drains that flag once per handler, so several
//! mutations inside one pointer event still cost a single repaint.

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ThumbError, ThumbResult};

/// A text label composited onto the base image.
///
/// `x`/`y` is the anchor in image space; `y` is the baseline. How `x` relates to the text's
/// horizontal extent is decided by [`crate::TextAnchor`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextOverlay {
    /// Label contents, never empty.
    pub text: String,
    /// Anchor x in image space.
    pub x: f64,
    /// Baseline y in image space.
    pub y: f64,
    /// Font size in image-space pixels.
    pub font_size: u32,
    /// Fill color.
    pub color: Rgba8,
}

impl TextOverlay {
    /// Anchor as a point.
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Ink style shared by every point of a stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Ink color.
    pub color: Rgba8,
    /// Line width in image-space pixels.
    pub width: f64,
}

/// A freehand ink path. Once sealed it is never edited, only bulk-cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    style: StrokeStyle,
}

impl Stroke {
    fn begin(start: Point, style: StrokeStyle) -> Self {
        Self {
            points: vec![start],
            style,
        }
    }

    /// Points in the order they were recorded.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Color and width.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

/// Partial update applied by [`OverlayModel::edit_overlay`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayEdit {
    /// Replacement text.
    pub text: Option<String>,
    /// Replacement font size.
    pub font_size: Option<u32>,
    /// Replacement color.
    pub color: Option<Rgba8>,
}

/// Ordered labels, sealed strokes, the stroke being drawn, and the current selection.
#[derive(Debug, Default)]
pub struct OverlayModel {
    overlays: Vec<TextOverlay>,
    strokes: Vec<Stroke>,
    pending: Option<Stroke>,
    selected: Option<usize>,
    render_requested: bool,
}

impl OverlayModel {
    /// Empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels in insertion (= paint) order.
    pub fn overlays(&self) -> &[TextOverlay] {
        &self.overlays
    }

    /// Sealed strokes in creation order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The stroke currently being drawn, if any.
    pub fn pending_stroke(&self) -> Option<&Stroke> {
        self.pending.as_ref()
    }

    /// Index of the selected label.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// `true` if `index` is the selected label.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Append a label anchored at `anchor` and return its index. Blank text is rejected.
    pub fn add_text_overlay(
        &mut self,
        text: &str,
        font_size: u32,
        color: Rgba8,
        anchor: Point,
    ) -> ThumbResult<usize> {
        validate_text(text)?;
        if font_size == 0 {
            return Err(ThumbError::invalid_input("font size must be > 0"));
        }
        self.overlays.push(TextOverlay {
            text: text.to_string(),
            x: anchor.x,
            y: anchor.y,
            font_size,
            color,
        });
        self.request_render();
        Ok(self.overlays.len() - 1)
    }

    /// Overwrite a label's anchor.
    ///
    /// An out-of-range index is a caller bug: debug builds panic, release builds log and ignore
    /// the call.
    pub fn move_overlay(&mut self, index: usize, to: Point) {
        if !self.check_index(index, "move_overlay") {
            return;
        }
        let o = &mut self.overlays[index];
        o.x = to.x;
        o.y = to.y;
        self.request_render();
    }

    /// Select a label, or deselect with `None`. Same index contract as [`Self::move_overlay`].
    pub fn select(&mut self, index: Option<usize>) {
        if let Some(i) = index
            && !self.check_index(i, "select")
        {
            return;
        }
        if self.selected != index {
            self.selected = index;
            self.request_render();
        }
    }

    /// Restyle or retext an existing label.
    pub fn edit_overlay(&mut self, index: usize, edit: OverlayEdit) -> ThumbResult<()> {
        if index >= self.overlays.len() {
            return Err(ThumbError::invalid_input(format!(
                "overlay index {index} out of range ({} overlays)",
                self.overlays.len()
            )));
        }
        if let Some(text) = &edit.text {
            validate_text(text)?;
        }
        if edit.font_size == Some(0) {
            return Err(ThumbError::invalid_input("font size must be > 0"));
        }
        let o = &mut self.overlays[index];
        if let Some(text) = edit.text {
            o.text = text;
        }
        if let Some(size) = edit.font_size {
            o.font_size = size;
        }
        if let Some(color) = edit.color {
            o.color = color;
        }
        self.request_render();
        Ok(())
    }

    /// Delete one label, keeping the selection pointed at the same label when it survives.
    pub fn remove_overlay(&mut self, index: usize) -> Option<TextOverlay> {
        if index >= self.overlays.len() {
            return None;
        }
        let removed = self.overlays.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        self.request_render();
        Some(removed)
    }

    /// Drop every label and stroke (including one being drawn) and clear the selection.
    pub fn clear_all(&mut self) {
        self.overlays.clear();
        self.strokes.clear();
        self.pending = None;
        self.selected = None;
        self.request_render();
    }

    /// Start a new stroke. An unsealed stroke already in progress is sealed first.
    pub fn begin_stroke(&mut self, start: Point, style: StrokeStyle) {
        self.seal_stroke();
        self.pending = Some(Stroke::begin(start, style));
        self.request_render();
    }

    /// Append to the stroke being drawn. Returns `false` if no stroke is in progress.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        let Some(stroke) = self.pending.as_mut() else {
            return false;
        };
        stroke.points.push(point);
        self.request_render();
        true
    }

    /// Seal the stroke being drawn and return its index among sealed strokes.
    pub fn seal_stroke(&mut self) -> Option<usize> {
        let stroke = self.pending.take()?;
        self.strokes.push(stroke);
        self.request_render();
        Some(self.strokes.len() - 1)
    }

    /// Throw away the stroke being drawn without sealing it.
    pub fn discard_pending_stroke(&mut self) -> bool {
        if self.pending.take().is_some() {
            self.request_render();
            return true;
        }
        false
    }

    /// Mark the model as needing a repaint.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Drain the repaint flag.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    fn check_index(&self, index: usize, op: &str) -> bool {
        let in_range = index < self.overlays.len();
        debug_assert!(
            in_range,
            "{op}: overlay index {index} out of range ({} overlays)",
            self.overlays.len()
        );
        if !in_range {
            tracing::warn!(op, index, len = self.overlays.len(), "overlay index out of range");
        }
        in_range
    }
}

fn validate_text(text: &str) -> ThumbResult<()> {
    if text.trim().is_empty() {
        return Err(ThumbError::invalid_input("overlay text must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/overlay.rs"]
mod tests;
