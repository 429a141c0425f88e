//! Screen-space <-> image-space conversion.
//!
//! The drawing surface is always sized to the base image's native resolution; the shell shows it
//! scaled uniformly by [`DisplayScale`]. Pointer positions arrive in screen space together with
//! the surface's current on-screen top-left, which must be re-read on every event because the
//! surface can scroll or resize between events.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{ThumbError, ThumbResult};

/// Ratio of on-screen width to native image width. Always finite and `> 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayScale(f64);

impl DisplayScale {
    /// Unscaled display.
    pub const IDENTITY: Self = Self(1.0);

    /// Validate a raw scale factor.
    pub fn new(scale: f64) -> ThumbResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ThumbError::invalid_input(format!(
                "display scale must be finite and > 0, got {scale}"
            )));
        }
        Ok(Self(scale))
    }

    /// `container_width / image_width`.
    pub fn fit_width(container_width: f64, image_width: u32) -> ThumbResult<Self> {
        if image_width == 0 {
            return Err(ThumbError::invalid_input("image width must be > 0"));
        }
        Self::new(container_width / f64::from(image_width))
    }

    /// Raw factor.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Map a screen-space point into image space.
///
/// `origin` is the drawing surface's on-screen top-left for this event; `None` means the surface
/// is not mounted yet and the event must be ignored.
pub fn to_image_space(screen: Point, origin: Option<Point>, scale: DisplayScale) -> Option<Point> {
    let origin = origin?;
    let s = scale.get();
    Some(Point::new(
        (screen.x - origin.x) / s,
        (screen.y - origin.y) / s,
    ))
}

/// Inverse of [`to_image_space`].
pub fn to_screen_space(image: Point, origin: Point, scale: DisplayScale) -> Point {
    origin + Vec2::new(image.x, image.y) * scale.get()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/mapper.rs"]
mod tests;
