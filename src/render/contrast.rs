//! Adaptive text color selection from the rendered poster.

use crate::foundation::core::{PixelDensity, Rgba8};
use crate::layout::typeset::{TextBound, TextKind};
use crate::render::backend::FrameRGBA;

pub const TEXT_BRIGHT: Rgba8 = Rgba8::rgb(0xff, 0xff, 0xff);
pub const TEXT_MUTED: Rgba8 = Rgba8::rgb(0xe8, 0xe9, 0xeb);
pub const EXP_MUTED: Rgba8 = Rgba8::rgb(0x8b, 0x8d, 0x93);

const SAMPLE_STRIDE: f64 = 10.0;
const BRIGHT_THRESHOLD: f64 = 120.0;
const LIGHT_THRESHOLD: f64 = 50.0;

/// Chosen foreground for one text bound.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextColor {
    pub bound: TextBound,
    /// Mean `(r + g + b) / 3` under the bound; `0` when nothing was sampled.
    pub brightness: f64,
    pub color: Rgba8,
}

/// Mean brightness on a 10-unit grid inside `bound`.
///
/// Sample indices use the flat `4 * (floor(y*d) * width + floor(x*d))` formula, so points past
/// the right edge wrap into the next row; indices outside the buffer are skipped.
pub fn sample_brightness(frame: &FrameRGBA, bound: &TextBound, density: PixelDensity) -> f64 {
    let d = density.as_f64();
    let row = i64::from(frame.width);
    let mut total = 0.0;
    let mut count = 0usize;

    let mut x = bound.left.floor();
    while x < bound.right {
        let mut y = bound.top.floor();
        while y < bound.bottom {
            let idx = 4 * (((y * d).floor() as i64) * row + (x * d).floor() as i64);
            if idx >= 0
                && let Some(px) = frame.data.get(idx as usize..idx as usize + 3)
            {
                total += (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0;
                count += 1;
            }
            y += SAMPLE_STRIDE;
        }
        x += SAMPLE_STRIDE;
    }

    if count > 0 { total / count as f64 } else { 0.0 }
}

/// Brightness to base text color. The two upper bands both map to white.
#[allow(clippy::if_same_then_else)]
pub fn select_text_color(brightness: f64) -> Rgba8 {
    if brightness > BRIGHT_THRESHOLD {
        TEXT_BRIGHT
    } else if brightness > LIGHT_THRESHOLD {
        TEXT_BRIGHT
    } else {
        TEXT_MUTED
    }
}

/// Description blocks use a dimmer gray instead of the muted tone.
pub fn color_for_kind(kind: TextKind, base: Rgba8) -> Rgba8 {
    match kind {
        TextKind::Exp if base != TEXT_BRIGHT => EXP_MUTED,
        _ => base,
    }
}

/// Select a color for every bound, in input order. Reads the frame only.
#[tracing::instrument(skip_all, fields(bounds = bounds.len()))]
pub fn adaptive_text_colors(
    frame: &FrameRGBA,
    bounds: &[TextBound],
    density: PixelDensity,
) -> Vec<TextColor> {
    bounds
        .iter()
        .map(|bound| {
            let brightness = sample_brightness(frame, bound, density);
            TextColor {
                bound: *bound,
                brightness,
                color: color_for_kind(bound.kind, select_text_color(brightness)),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/contrast.rs"]
mod tests;
