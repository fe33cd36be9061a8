use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Logical poster surface size (CSS-pixel units).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
}

impl Canvas {
    /// Build a canvas, rejecting empty or non-finite sizes.
    pub fn new(width: f64, height: f64) -> PosterResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(PosterError::validation(
                "canvas width and height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a replaced alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Normalized `[r, g, b]` in `0..=1`, as shader uniforms expect.
    pub fn to_unit_rgb(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }

    /// `#rrggbb` form (alpha dropped).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| crate::foundation::math::mul_div255_u8(u16::from(c), a);
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

/// Device pixel density of a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelDensity(pub u32);

impl PixelDensity {
    pub fn as_f64(self) -> f64 {
        f64::from(self.0.max(1))
    }

    /// Device pixel extent of a logical length.
    pub fn device_px(self, logical: f64) -> u32 {
        (logical * self.as_f64()).round().max(0.0) as u32
    }
}
