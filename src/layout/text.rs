use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{PosterError, PosterResult};

/// Font size and line height of one text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    /// Multiplier of `size`.
    pub line_height: f64,
}

impl TextStyle {
    pub fn new(size: f64, line_height: f64) -> Self {
        Self { size, line_height }
    }

    pub fn line_px(&self) -> f64 {
        self.size * self.line_height
    }
}

/// Measured extent of a wrapped text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
    pub lines: usize,
}

/// Phase-one text measurement. Implementations must be deterministic.
pub trait TextMeasure {
    fn measure(
        &mut self,
        text: &str,
        style: TextStyle,
        max_width: Option<f64>,
    ) -> PosterResult<TextExtent>;
}

/// Monospace-style estimate: every char advances `ratio * size`, greedy word wrap.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvance {
    pub ratio: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { ratio: 0.6 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(
        &mut self,
        text: &str,
        style: TextStyle,
        max_width: Option<f64>,
    ) -> PosterResult<TextExtent> {
        validate_style(style)?;
        let advance = style.size * self.ratio;
        let width_of = |chars: usize| chars as f64 * advance;

        let mut widest = 0usize;
        let mut lines = 0usize;
        for paragraph in text.lines() {
            let mut current = 0usize;
            let mut started = false;
            for word in paragraph.split_whitespace() {
                let n = word.chars().count();
                let candidate = if started { current + 1 + n } else { n };
                let fits = max_width.is_none_or(|w| width_of(candidate) <= w);
                if !started || fits {
                    current = candidate;
                } else {
                    widest = widest.max(current);
                    lines += 1;
                    current = n;
                }
                started = true;
            }
            widest = widest.max(current);
            lines += 1;
        }

        Ok(TextExtent {
            width: width_of(widest),
            height: lines as f64 * style.line_px(),
            lines,
        })
    }
}

/// Raw font bytes shared between measurement and drawing.
#[derive(Clone, Debug)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> PosterResult<Self> {
        if bytes.is_empty() {
            return Err(PosterError::validation("font file is empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
        })
    }

    pub fn from_path(path: &Path) -> PosterResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| PosterError::io(format!("read font {}: {e}", path.display())))?;
        Self::from_bytes(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn font_data(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.bytes.as_ref().clone()),
            0,
        )
    }
}

/// RGBA8 brush color carried through parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Parley contexts reused across layouts.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        font: &FontFace,
        size_px: f32,
        brush: TextBrush,
        max_width_px: Option<f32>,
    ) -> PosterResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::layout("text size must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PosterError::layout("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PosterError::layout("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(max_width_px);
        if let Some(w) = max_width_px {
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        }
        Ok(layout)
    }
}

/// Measurement backed by real glyph advances from a font.
pub struct FontMeasure {
    font: FontFace,
    engine: TextLayoutEngine,
}

impl FontMeasure {
    pub fn new(font: FontFace) -> Self {
        Self {
            font,
            engine: TextLayoutEngine::new(),
        }
    }
}

impl TextMeasure for FontMeasure {
    fn measure(
        &mut self,
        text: &str,
        style: TextStyle,
        max_width: Option<f64>,
    ) -> PosterResult<TextExtent> {
        validate_style(style)?;
        let layout = self.engine.layout_plain(
            text,
            &self.font,
            style.size as f32,
            TextBrush::default(),
            max_width.map(|w| w as f32),
        )?;
        let lines = layout.lines().count().max(1);
        Ok(TextExtent {
            width: f64::from(layout.width()),
            height: lines as f64 * style.line_px(),
            lines,
        })
    }
}

fn validate_style(style: TextStyle) -> PosterResult<()> {
    if !(style.size.is_finite() && style.size > 0.0) {
        return Err(PosterError::layout("font size must be finite and > 0"));
    }
    if !(style.line_height.is_finite() && style.line_height > 0.0) {
        return Err(PosterError::layout("line height must be finite and > 0"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
