use crate::foundation::core::Rgba8;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::{fract, unit_to_u8};
use crate::random::seed::Seed;
use crate::render::backend::FrameRGBA;

/// Fixed poster palette.
pub const PALETTE: [Rgba8; 5] = [
    Rgba8::rgb(0xff, 0x2d, 0x55),
    Rgba8::rgb(0xff, 0x6b, 0x35),
    Rgba8::rgb(0xff, 0xb8, 0x00),
    Rgba8::rgb(0x34, 0xc7, 0x59),
    Rgba8::rgb(0x5a, 0xc8, 0xfa),
];

/// `fract(sin(raw + offset) * 10000)`.
pub fn gradient_draw(raw: i64, offset: u32) -> f64 {
    fract(((raw as f64) + f64::from(offset)).sin() * 10_000.0)
}

/// Palette index selected by the draw at `offset`.
pub fn palette_index(raw: i64, offset: u32) -> usize {
    let idx = (gradient_draw(raw, offset) * PALETTE.len() as f64).floor() as usize;
    idx.min(PALETTE.len() - 1)
}

/// Two-color, four-position descriptor for the decorative background gradient.
///
/// Positions are whole percentages in `0..100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GradientSpec {
    pub c1: Rgba8,
    pub c2: Rgba8,
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl GradientSpec {
    /// Sample the gradient for a seed: draws 1-2 pick colors, draws 3-6 pick positions.
    pub fn from_seed(seed: Seed) -> Self {
        let raw = seed.raw();
        let pct = |offset: u32| (gradient_draw(raw, offset) * 100.0).floor() as u32;
        Self {
            c1: PALETTE[palette_index(raw, 1)],
            c2: PALETTE[palette_index(raw, 2)],
            x1: pct(3),
            y1: pct(4),
            x2: pct(5),
            y2: pct(6),
        }
    }

    pub fn from_date(date: &str) -> Self {
        Self::from_seed(Seed::from_date(date))
    }

    /// Glow centers as `0..1` fractions, in the order the shaders expect.
    pub fn glow_positions(&self) -> [[f64; 2]; 2] {
        let f = |v: u32| f64::from(v) / 100.0;
        [[f(self.x1), f(self.y1)], [f(self.x2), f(self.y2)]]
    }

    /// CSS background for preview tiles.
    pub fn to_css(&self) -> String {
        format!(
            "radial-gradient(circle at {}% {}%, {} 0%, transparent 60%), \
             radial-gradient(circle at {}% {}%, {} 0%, transparent 50%)",
            self.x1,
            self.y1,
            self.c1.to_hex(),
            self.x2,
            self.y2,
            self.c2.to_hex(),
        )
    }
}

/// Rasterize the CSS gradient: two farthest-corner radial layers, first on top.
///
/// Output is straight-alpha RGBA8.
pub fn render_gradient_fallback(
    spec: &GradientSpec,
    width: u32,
    height: u32,
    opacity: f64,
) -> PosterResult<FrameRGBA> {
    if width == 0 || height == 0 {
        return Err(PosterError::validation(
            "gradient fallback size must be non-zero",
        ));
    }
    let (w, h) = (f64::from(width), f64::from(height));
    let layers = [
        RadialLayer::new(spec.c1, spec.x1, spec.y1, 0.6, w, h),
        RadialLayer::new(spec.c2, spec.x2, spec.y2, 0.5, w, h),
    ];
    let opacity = opacity.clamp(0.0, 1.0);

    let mut data = vec![0u8; (width as usize) * (height as usize) * 4];
    for (i, px) in data.chunks_exact_mut(4).enumerate() {
        let x = (i % width as usize) as f64 + 0.5;
        let y = (i / width as usize) as f64 + 0.5;

        let (top_c, top_a) = layers[0].sample(x, y);
        let (bot_c, bot_a) = layers[1].sample(x, y);
        let out_a = top_a + bot_a * (1.0 - top_a);
        if out_a <= 0.0 {
            continue;
        }
        for k in 0..3 {
            let c = (top_c[k] * top_a + bot_c[k] * bot_a * (1.0 - top_a)) / out_a;
            px[k] = unit_to_u8(c);
        }
        px[3] = unit_to_u8(out_a * opacity);
    }

    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied: false,
    })
}

struct RadialLayer {
    color: [f64; 3],
    cx: f64,
    cy: f64,
    radius: f64,
    stop: f64,
}

impl RadialLayer {
    fn new(color: Rgba8, x_pct: u32, y_pct: u32, stop: f64, w: f64, h: f64) -> Self {
        let cx = w * f64::from(x_pct) / 100.0;
        let cy = h * f64::from(y_pct) / 100.0;
        let radius = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)]
            .iter()
            .map(|&(x, y)| ((x - cx).powi(2) + (y - cy).powi(2)).sqrt())
            .fold(0.0_f64, f64::max)
            .max(1.0);
        Self {
            color: color.to_unit_rgb(),
            cx,
            cy,
            radius,
            stop,
        }
    }

    fn sample(&self, x: f64, y: f64) -> ([f64; 3], f64) {
        let d = ((x - self.cx).powi(2) + (y - self.cy).powi(2)).sqrt() / self.radius;
        let a = (1.0 - d / self.stop).clamp(0.0, 1.0);
        (self.color, a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/gradient.rs"]
mod tests;
