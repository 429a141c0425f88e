//! Label measurement and shaping: a Parley layout over one registered face, plus a fixed-advance
//! fallback used when no font is configured.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ThumbError, ThumbResult};

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// One glyph, positioned relative to the layout's top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPos {
    /// Glyph id in the shaping font.
    pub id: u32,
    /// Pen position along the line.
    pub x: f32,
    /// Baseline of its line.
    pub y: f32,
}

/// A run of glyphs sharing one size and brush.
#[derive(Clone, Debug)]
pub struct ShapedRun {
    /// Font size the run was shaped at.
    pub font_size: f32,
    /// Fill color.
    pub brush: TextBrushRgba8,
    /// Glyphs in visual order.
    pub glyphs: Vec<GlyphPos>,
}

/// Shaped single-line label ready to be rasterized.
#[derive(Clone, Debug)]
pub struct ShapedText {
    /// Advance width of the whole label.
    pub width: f64,
    /// Distance from the layout top to the first baseline.
    pub baseline: f64,
    /// Glyph runs.
    pub runs: Vec<ShapedRun>,
    /// Face the glyph ids refer to.
    pub font: vello_cpu::peniko::FontData,
}

/// Text-measurement capability of the drawing surface.
///
/// The hit tester and the selection outline both size label boxes through the same instance, so
/// the clickable region and the drawn highlight always agree.
pub trait TextMeasure {
    /// Advance width of `text` at `font_size`, in image-space pixels.
    fn measure_width(&mut self, text: &str, font_size: u32) -> f64;

    /// Shape `text` into glyphs. Measurers without a real font return `None` and the label is
    /// not rasterized.
    fn shape(
        &mut self,
        _text: &str,
        _font_size: u32,
        _color: Rgba8,
    ) -> ThumbResult<Option<ShapedText>> {
        Ok(None)
    }
}

/// Deterministic measurer: every character advances `font_size * em_ratio`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasure {
    /// Advance per character as a fraction of the font size.
    pub em_ratio: f64,
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self { em_ratio: 0.5 }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure_width(&mut self, text: &str, font_size: u32) -> f64 {
        text.chars().count() as f64 * f64::from(font_size) * self.em_ratio
    }
}

/// Parley-backed shaper over a single registered font face.
pub struct FontTextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl FontTextEngine {
    /// Register `font_bytes` (TrueType/OpenType) as the only face used for labels.
    pub fn from_bytes(font_bytes: Vec<u8>) -> ThumbResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ThumbError::asset_load("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThumbError::asset_load("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Read a font file from disk.
    pub fn from_path(path: &Path) -> ThumbResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Family name of the registered face.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout(
        &mut self,
        text: &str,
        font_size: u32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size as f32));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for FontTextEngine {
    fn measure_width(&mut self, text: &str, font_size: u32) -> f64 {
        if font_size == 0 {
            return 0.0;
        }
        f64::from(self.layout(text, font_size, TextBrushRgba8::default()).width())
    }

    fn shape(
        &mut self,
        text: &str,
        font_size: u32,
        color: Rgba8,
    ) -> ThumbResult<Option<ShapedText>> {
        if font_size == 0 {
            return Err(ThumbError::invalid_input("font size must be > 0"));
        }
        let layout = self.layout(text, font_size, color.into());
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(f64::from(font_size));

        let mut runs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                runs.push(ShapedRun {
                    font_size: run.run().font_size(),
                    brush: run.style().brush,
                    glyphs: run
                        .positioned_glyphs()
                        .map(|g| GlyphPos {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        })
                        .collect(),
                });
            }
        }

        Ok(Some(ShapedText {
            width: f64::from(layout.width()),
            baseline,
            runs,
            font: self.font.clone(),
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
