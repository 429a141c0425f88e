use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ThumbError, ThumbResult};

/// Horizontal anchor of a text overlay. Vertically, `y` is always the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// `x` is the horizontal center of the text.
    #[default]
    Center,
    /// `x` is the left edge of the text.
    Start,
}

/// Session-wide editor settings.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Font size used when the caller does not pick one.
    pub default_font_size: u32,
    /// Inclusive `[min, max]` font size accepted for overlays; larger/smaller values clamp.
    pub font_size_range: [u32; 2],
    /// Color used when the caller does not pick one.
    pub default_text_color: Rgba8,
    /// Horizontal anchor convention for every overlay.
    pub text_anchor: TextAnchor,
    /// Image-space padding around the measured text box, for hit-testing and the outline.
    pub hit_padding: f64,
    /// Outline color of the selected overlay.
    pub selection_color: Rgba8,
    /// Outline width of the selected overlay.
    pub selection_width: f64,
    /// Ink color for new strokes.
    pub stroke_color: Rgba8,
    /// Ink width for new strokes.
    pub stroke_width: f64,
    /// Font face used to shape and rasterize labels.
    pub font_path: Option<PathBuf>,
    /// File name offered when the export is downloaded.
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_font_size: 48,
            font_size_range: [12, 120],
            default_text_color: Rgba8::WHITE,
            text_anchor: TextAnchor::Center,
            hit_padding: 10.0,
            selection_color: Rgba8::rgb(0x3B, 0x82, 0xF6),
            selection_width: 2.0,
            stroke_color: Rgba8::rgb(255, 0, 0),
            stroke_width: 5.0,
            font_path: None,
            export_file_name: "thumbnail.png".to_string(),
        }
    }
}

impl EditorConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> ThumbResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_slice(&bytes)
    }

    /// Parse and validate JSON config bytes.
    pub fn from_json_slice(bytes: &[u8]) -> ThumbResult<Self> {
        let cfg: Self = serde_json::from_slice(bytes).context("parse editor config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> ThumbResult<()> {
        let [min, max] = self.font_size_range;
        if min == 0 || min > max {
            return Err(ThumbError::invalid_input(format!(
                "font_size_range must satisfy 0 < min <= max, got [{min}, {max}]"
            )));
        }
        if !(min..=max).contains(&self.default_font_size) {
            return Err(ThumbError::invalid_input(
                "default_font_size must lie inside font_size_range",
            ));
        }
        if !self.hit_padding.is_finite() || self.hit_padding < 0.0 {
            return Err(ThumbError::invalid_input("hit_padding must be finite and >= 0"));
        }
        for (name, w) in [
            ("selection_width", self.selection_width),
            ("stroke_width", self.stroke_width),
        ] {
            if !w.is_finite() || w <= 0.0 {
                return Err(ThumbError::invalid_input(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ThumbError::invalid_input("export_file_name must be non-empty"));
        }
        Ok(())
    }

    /// Clamp a requested font size into the configured range; `0` is rejected.
    pub fn clamp_font_size(&self, font_size: u32) -> ThumbResult<u32> {
        if font_size == 0 {
            return Err(ThumbError::invalid_input("font size must be > 0"));
        }
        let [min, max] = self.font_size_range;
        Ok(font_size.clamp(min, max))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
