//! Label hit-testing. The box computed here is also the one the renderer outlines around the
//! selected label.

use crate::config::TextAnchor;
use crate::foundation::core::{Point, Rect};
use crate::model::overlay::TextOverlay;
use crate::render::text::TextMeasure;

/// How a label's measured width turns into a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    /// Padding added on every side, in image-space pixels.
    pub padding: f64,
    /// Horizontal anchor convention.
    pub anchor: TextAnchor,
}

/// Box of `overlay` given its measured `text_width`.
///
/// Spans `font_size` above the baseline and `padding` around the glyph extent.
pub fn overlay_bounds(overlay: &TextOverlay, text_width: f64, geom: BoxGeometry) -> Rect {
    let left = match geom.anchor {
        TextAnchor::Center => overlay.x - text_width / 2.0,
        TextAnchor::Start => overlay.x,
    };
    let top = overlay.y - f64::from(overlay.font_size);
    Rect::new(
        left - geom.padding,
        top - geom.padding,
        left + text_width + geom.padding,
        overlay.y + geom.padding,
    )
}

/// Measure and box one label.
pub fn measure_bounds(
    overlay: &TextOverlay,
    measure: &mut dyn TextMeasure,
    geom: BoxGeometry,
) -> Rect {
    let width = measure.measure_width(&overlay.text, overlay.font_size);
    overlay_bounds(overlay, width, geom)
}

/// Index of the topmost label whose box contains `point`.
///
/// Labels are scanned newest-first, so where boxes overlap the one painted on top wins.
pub fn hit_test(
    point: Point,
    overlays: &[TextOverlay],
    measure: &mut dyn TextMeasure,
    geom: BoxGeometry,
) -> Option<usize> {
    overlays
        .iter()
        .enumerate()
        .rev()
        .find(|(_, o)| contains_inclusive(measure_bounds(o, measure, geom), point))
        .map(|(i, _)| i)
}

fn contains_inclusive(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

#[cfg(test)]
#[path = "../../tests/unit/render/hit.rs"]
mod tests;
