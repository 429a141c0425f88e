//! JSON edit scripts: a recorded sequence of editor calls, replayed headlessly.
//!
//! ```json
//! {
//!   "origin": [0, 0],
//!   "ops": [
//!     { "op": "add_text", "text": "Hi", "font_size": 64, "color": "#FFCC00" },
//!     { "op": "down", "x": 400, "y": 210 },
//!     { "op": "move", "x": 200, "y": 120 },
//!     { "op": "up" }
//!   ]
//! }
//! ```
//!
//! Pointer coordinates are in screen space relative to `origin`, exactly as a shell would
//! deliver them; they pass through the editor's display scale.

use std::path::Path;

use anyhow::Context as _;

use crate::editor::gesture::Mode;
use crate::editor::session::Editor;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::model::overlay::OverlayEdit;

/// A parsed edit script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditScript {
    /// On-screen top-left of the surface for every pointer op.
    #[serde(default)]
    pub origin: [f64; 2],
    /// Operations in replay order.
    pub ops: Vec<ScriptOp>,
}

/// One recorded editor call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum ScriptOp {
    /// [`Editor::set_container_width`].
    SetContainerWidth {
        /// On-screen width.
        width: f64,
    },
    /// [`Editor::add_text_overlay`].
    AddText {
        /// Label text.
        text: String,
        /// Font size; configured default when absent.
        #[serde(default)]
        font_size: Option<u32>,
        /// Color; configured default when absent.
        #[serde(default)]
        color: Option<Rgba8>,
    },
    /// [`Editor::edit_overlay`].
    Edit {
        /// Label index.
        index: usize,
        /// Replacement text.
        #[serde(default)]
        text: Option<String>,
        /// Replacement font size.
        #[serde(default)]
        font_size: Option<u32>,
        /// Replacement color.
        #[serde(default)]
        color: Option<Rgba8>,
    },
    /// [`Editor::set_mode`].
    Mode {
        /// Mode to switch to.
        mode: Mode,
    },
    /// [`Editor::pointer_down`].
    Down {
        /// Screen x.
        x: f64,
        /// Screen y.
        y: f64,
    },
    /// [`Editor::pointer_move`].
    Move {
        /// Screen x.
        x: f64,
        /// Screen y.
        y: f64,
    },
    /// [`Editor::pointer_up`].
    Up,
    /// [`Editor::pointer_leave`].
    Leave,
    /// [`Editor::select`].
    Select {
        /// Label index, or `null` to deselect.
        index: Option<usize>,
    },
    /// [`Editor::remove_overlay`].
    Remove {
        /// Label index.
        index: usize,
    },
    /// [`Editor::clear_all`].
    Clear,
}

impl EditScript {
    /// Parse script JSON.
    pub fn from_json(bytes: &[u8]) -> ThumbResult<Self> {
        let script: Self = serde_json::from_slice(bytes).context("parse edit script JSON")?;
        Ok(script)
    }

    /// Read and parse a script file.
    pub fn from_path(path: &Path) -> ThumbResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read edit script '{}'", path.display()))?;
        Self::from_json(&bytes)
    }

    /// Replay every op against `editor`, stopping at the first failure.
    ///
    /// Indices are checked here so a bad script is reported as invalid input instead of
    /// tripping the model's debug assertions.
    pub fn apply(&self, editor: &mut Editor) -> ThumbResult<()> {
        let origin = Some(Point::new(self.origin[0], self.origin[1]));
        for (step, op) in self.ops.iter().enumerate() {
            tracing::debug!(step, ?op, "script op");
            let at = |e: ThumbError| match e {
                ThumbError::InvalidInput(msg) => {
                    ThumbError::invalid_input(format!("script op {step}: {msg}"))
                }
                other => other,
            };
            let result = match op {
                ScriptOp::SetContainerWidth { width } => editor.set_container_width(*width),
                ScriptOp::AddText {
                    text,
                    font_size,
                    color,
                } => editor.add_text_overlay(text, *font_size, *color).map(drop),
                ScriptOp::Edit {
                    index,
                    text,
                    font_size,
                    color,
                } => editor.edit_overlay(
                    *index,
                    OverlayEdit {
                        text: text.clone(),
                        font_size: *font_size,
                        color: *color,
                    },
                ),
                ScriptOp::Mode { mode } => editor.set_mode(*mode),
                ScriptOp::Down { x, y } => editor.pointer_down(Point::new(*x, *y), origin),
                ScriptOp::Move { x, y } => editor.pointer_move(Point::new(*x, *y), origin),
                ScriptOp::Up => editor.pointer_up(),
                ScriptOp::Leave => editor.pointer_leave(),
                ScriptOp::Select { index } => match index {
                    Some(i) => check_index(editor, *i).and_then(|()| editor.select(Some(*i))),
                    None => editor.select(None),
                },
                ScriptOp::Remove { index } => check_index(editor, *index)
                    .and_then(|()| editor.remove_overlay(*index))
                    .map(drop),
                ScriptOp::Clear => editor.clear_all(),
            };
            result.map_err(at)?;
        }
        Ok(())
    }
}

fn check_index(editor: &Editor, index: usize) -> ThumbResult<()> {
    let len = editor.model().overlays().len();
    if index >= len {
        return Err(ThumbError::invalid_input(format!(
            "overlay index {index} out of range ({len} overlays)"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
