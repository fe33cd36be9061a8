use crate::foundation::core::{PixelDensity, Point};
use crate::foundation::error::PosterResult;
use crate::layout::typeset::{PosterTypeset, TextKind};
use crate::layout::typography::ChannelSplit;
use crate::render::backend::{FrameRGBA, RenderBackend, TextRun};
use crate::render::contrast::{TEXT_BRIGHT, TextColor};

const SIDEBAR_ADVANCE: f64 = 0.6;

/// Title and description runs, colored by the contrast pass.
///
/// `colors` must be in the order of [`PosterTypeset::bounds`].
pub fn block_runs(typeset: &PosterTypeset, colors: &[TextColor]) -> Vec<TextRun> {
    typeset
        .items
        .iter()
        .zip(colors)
        .filter(|(item, _)| item.bound.kind != TextKind::Bottom)
        .map(|(item, c)| TextRun {
            text: item.text.clone(),
            origin: Point::new(item.bound.left, item.bound.top),
            size: item.style.size,
            color: c.color,
            wrap_width: item.wrap_width,
            rotation_deg: 0.0,
            pivot: Point::ZERO,
        })
        .collect()
}

/// Date label rotated a quarter turn counter-clockwise around its center.
pub fn sidebar_run(typeset: &PosterTypeset) -> TextRun {
    let s = &typeset.sidebar;
    let est_width = s.text.chars().count() as f64 * s.size * SIDEBAR_ADVANCE;
    TextRun {
        text: s.text.clone(),
        origin: Point::new(s.center.x - est_width * 0.5, s.center.y - s.size * 0.5),
        size: s.size,
        color: TEXT_BRIGHT,
        wrap_width: None,
        rotation_deg: -90.0,
        pivot: s.center,
    }
}

/// Draw every text element over the finished poster. Returns `false` when the backend has no
/// font and nothing was drawn.
#[tracing::instrument(skip_all)]
pub fn draw_overlay(
    backend: &mut dyn RenderBackend,
    frame: &mut FrameRGBA,
    typeset: &PosterTypeset,
    colors: &[TextColor],
    split: &ChannelSplit,
    density: PixelDensity,
) -> PosterResult<bool> {
    let mut runs = block_runs(typeset, colors);
    runs.push(sidebar_run(typeset));
    if !backend.draw_text(frame, &runs, density)? {
        return Ok(false);
    }

    let bottom = typeset
        .items
        .iter()
        .zip(colors)
        .find(|(item, _)| item.bound.kind == TextKind::Bottom);
    if let Some((item, c)) = bottom {
        let run = TextRun {
            text: item.text.clone(),
            origin: Point::new(item.bound.left, item.bound.top),
            size: item.style.size,
            color: c.color,
            wrap_width: None,
            rotation_deg: 0.0,
            pivot: Point::ZERO,
        };
        let layers = split.layers(item.style.size, c.color);
        let offsets = [layers[0].0, layers[1].0, layers[2].0];
        backend.draw_channel_split(frame, &run, offsets, density)?;
    }
    Ok(true)
}
