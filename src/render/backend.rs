use crate::compile::plan::PosterPlan;
use crate::foundation::core::{PixelDensity, Point, Rgba8};
use crate::foundation::error::{PosterError, PosterResult};

/// A rendered frame as RGBA8 pixels.
///
/// Poster frames come out of the rasterizer premultiplied; shader frames are straight alpha. The
/// `premultiplied` flag makes the difference explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Transparent frame.
    pub fn new(width: u32, height: u32, premultiplied: bool) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
            premultiplied,
        }
    }

    pub fn validate(&self) -> PosterResult<()> {
        let expected = (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4);
        if self.data.len() != expected {
            return Err(PosterError::render(format!(
                "frame byte len {} does not match {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel bytes.
    pub fn to_straight(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// Text run for the overlay pass, in logical units.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Top-left corner of the layout box before `rotation_deg` is applied around `pivot`.
    pub origin: Point,
    pub size: f64,
    pub color: Rgba8,
    pub wrap_width: Option<f64>,
    pub rotation_deg: f64,
    pub pivot: Point,
}

/// Renderer that turns a [`PosterPlan`] into pixels and draws text on top of frames.
pub trait RenderBackend {
    fn render_plan(&mut self, plan: &PosterPlan, density: PixelDensity) -> PosterResult<FrameRGBA>;

    /// Draw text runs over `frame`. Backends without a font leave the frame untouched and
    /// return `false`.
    fn draw_text(
        &mut self,
        frame: &mut FrameRGBA,
        runs: &[TextRun],
        density: PixelDensity,
    ) -> PosterResult<bool>;

    /// Draw `run` with its red, green and blue channels displaced by the given offsets.
    fn draw_channel_split(
        &mut self,
        frame: &mut FrameRGBA,
        run: &TextRun,
        offsets: [kurbo::Vec2; 3],
        density: PixelDensity,
    ) -> PosterResult<bool>;
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = crate::foundation::math::mul_div255_u8(u16::from(*c), a);
        }
    }
}
