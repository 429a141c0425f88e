//! thumbkit is an interactive thumbnail annotation engine.
//!
//! A session holds one base image, an ordered list of text labels and a set of freehand ink
//! strokes, all in the image's native pixel space. Pointer input arrives in screen space and is
//! mapped through the display scale before it reaches the gesture state machine:
//!
//! - Load a base image through [`Editor::begin_load`] / [`Editor::complete_load`]
//! - Feed pointer events ([`Editor::pointer_down`], [`Editor::pointer_move`], ...)
//! - Export the last rendered surface with [`Editor::export_png`]
//!
//! Rendering happens on the CPU at native resolution, so exports never depend on how large the
//! surface is shown on screen.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Session-wide settings.
pub mod config;
/// Interaction: gesture state machine and the editing session.
pub mod editor;
/// Base-image decoding, ticketed loads and thumbnail candidates.
pub mod assets;
/// Shared primitives, errors and coordinate mapping.
pub mod foundation;
/// Labels and strokes.
pub mod model;
/// Rasterization, hit-testing, text and export.
pub mod render;
/// JSON edit scripts replayed against an [`Editor`].
pub mod script;

pub use crate::assets::decode::{BaseImage, decode_image};
pub use crate::assets::loader::{ImageSource, LoadTicket, MediaKind};
pub use crate::assets::youtube::{ThumbnailGrid, ThumbnailVariant, extract_video_id};
pub use crate::config::{EditorConfig, TextAnchor};
pub use crate::editor::gesture::{Gesture, Mode, PointerEvent};
pub use crate::editor::session::{Editor, LoadOutcome};
pub use crate::foundation::core::{Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{ThumbError, ThumbResult};
pub use crate::foundation::mapper::{DisplayScale, to_image_space, to_screen_space};
pub use crate::model::overlay::{OverlayEdit, OverlayModel, Stroke, StrokeStyle, TextOverlay};
pub use crate::render::FrameRGBA;
pub use crate::render::cpu::RenderStats;
pub use crate::render::text::{FixedAdvanceMeasure, FontTextEngine, TextMeasure};
pub use crate::script::EditScript;
