use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{PosterError, PosterResult};
use crate::render::backend::FrameRGBA;

/// Encode a frame as an in-memory PNG, unpremultiplying first when needed.
pub fn encode_png(frame: &FrameRGBA) -> PosterResult<Vec<u8>> {
    frame.validate()?;
    let rgba = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight())
        .ok_or_else(|| PosterError::render("frame buffer does not match its dimensions"))?;
    let mut out = Cursor::new(Vec::new());
    rgba.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| PosterError::render(format!("png encode failed: {e}")))?;
    Ok(out.into_inner())
}

/// Write a frame to `path` as PNG, creating parent directories.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> PosterResult<()> {
    frame.validate()?;
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("failed to write png '{}'", path.display()))?;
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> PosterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
