//! Pointer gestures as one explicit state machine.
//!
//! The editing mode is an orthogonal, externally selected axis; the gesture is what the pointer
//! is doing right now. Ending a gesture (up, leave, mode switch) and aborting it (clear, image
//! switch) are distinct: ending seals a stroke in progress, aborting throws it away.

use crate::foundation::core::Point;
use crate::model::overlay::{OverlayModel, StrokeStyle};
use crate::render::hit::{BoxGeometry, hit_test};
use crate::render::text::TextMeasure;

/// Which mutation path pointer input drives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Select and drag text labels.
    #[default]
    Text,
    /// Draw freehand ink.
    Draw,
}

/// What the pointer is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Dragging the label at `index`.
    DraggingOverlay {
        /// Label being dragged.
        index: usize,
    },
    /// Inking; the model holds the unsealed stroke.
    Drawing {
        /// Most recent image-space point of the stroke.
        last_point: Point,
    },
}

/// A pointer event already mapped to image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Down(Point),
    /// Pointer moved.
    Move(Point),
    /// Button released.
    Up,
    /// Pointer left the surface (lost capture).
    Leave,
}

/// Everything a transition may touch.
pub struct GestureCtx<'a> {
    /// The only writer of labels and strokes.
    pub model: &'a mut OverlayModel,
    /// Measurer shared with the renderer.
    pub measure: &'a mut dyn TextMeasure,
    /// Label box geometry.
    pub geometry: BoxGeometry,
    /// Ink for strokes started by this gesture.
    pub stroke: StrokeStyle,
}

/// Mode + gesture state.
#[derive(Debug, Default)]
pub struct Controller {
    mode: Mode,
    gesture: Gesture,
}

impl Controller {
    /// Idle controller in [`Mode::Text`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current gesture.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Switch mode. A gesture in progress ends as if the pointer were released.
    pub fn set_mode(&mut self, mode: Mode, model: &mut OverlayModel) {
        if self.mode != mode {
            self.finish(model);
            self.mode = mode;
        }
    }

    /// Apply one pointer event.
    pub fn handle(&mut self, event: PointerEvent, ctx: &mut GestureCtx<'_>) {
        match event {
            PointerEvent::Down(p) => self.down(p, ctx),
            PointerEvent::Move(p) => self.moved(p, ctx),
            PointerEvent::Up | PointerEvent::Leave => self.finish(ctx.model),
        }
    }

    /// Drop any gesture in progress, discarding an unsealed stroke.
    pub fn abort(&mut self, model: &mut OverlayModel) {
        if let Gesture::Drawing { .. } = self.gesture {
            model.discard_pending_stroke();
        }
        if self.gesture != Gesture::Idle {
            tracing::debug!(gesture = ?self.gesture, "gesture aborted");
        }
        self.gesture = Gesture::Idle;
    }

    fn down(&mut self, p: Point, ctx: &mut GestureCtx<'_>) {
        // A down without a matching up: close the old gesture first.
        self.finish(ctx.model);
        match self.mode {
            Mode::Draw => {
                ctx.model.begin_stroke(p, ctx.stroke);
                self.gesture = Gesture::Drawing { last_point: p };
            }
            Mode::Text => {
                let hit = hit_test(p, ctx.model.overlays(), ctx.measure, ctx.geometry);
                ctx.model.select(hit);
                if let Some(index) = hit {
                    self.gesture = Gesture::DraggingOverlay { index };
                }
            }
        }
        tracing::debug!(mode = ?self.mode, gesture = ?self.gesture, "pointer down");
    }

    fn moved(&mut self, p: Point, ctx: &mut GestureCtx<'_>) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::DraggingOverlay { index } => ctx.model.move_overlay(*index, p),
            Gesture::Drawing { last_point } => {
                ctx.model.extend_stroke(p);
                *last_point = p;
            }
        }
    }

    fn finish(&mut self, model: &mut OverlayModel) {
        match self.gesture {
            Gesture::Idle => return,
            Gesture::Drawing { .. } => {
                model.seal_stroke();
            }
            Gesture::DraggingOverlay { .. } => {}
        }
        tracing::debug!(gesture = ?self.gesture, "gesture finished");
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/gesture.rs"]
mod tests;
