use crate::foundation::core::{Rgba8, Vec2};
use crate::random::seed::Seed;

/// Fraction of the font size a full-strength split displaces each outer channel.
const SPLIT_SCALE: f64 = 0.25;

/// Daily RGB channel-split parameters of the bottom word.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChannelSplit {
    /// Split amount in `[0.02, 0.15)`.
    pub offset: f64,
    /// Split direction in degrees, `[0, 360)`.
    pub rotation_deg: f64,
}

impl ChannelSplit {
    /// Drawn from a fresh stream on the diffused seed, so adjacent dates look different.
    pub fn from_seed(seed: Seed) -> Self {
        let mut rng = seed.layout_rng();
        let offset = rng.range(0.02, 0.15);
        let rotation_deg = rng.range(0.0, 360.0);
        Self {
            offset,
            rotation_deg,
        }
    }

    /// Displacement of the red layer; blue moves the opposite way.
    pub fn displacement(&self, font_size: f64) -> Vec2 {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        Vec2::new(cos, sin) * (self.offset * font_size * SPLIT_SCALE)
    }

    /// Red, green and blue layers as `(offset, color)`, drawn in that order.
    pub fn layers(&self, font_size: f64, fill: Rgba8) -> [(Vec2, Rgba8); 3] {
        let d = self.displacement(font_size);
        [
            (d, Rgba8::rgba(fill.r, 0, 0, fill.a)),
            (Vec2::ZERO, Rgba8::rgba(0, fill.g, 0, fill.a)),
            (-d, Rgba8::rgba(0, 0, fill.b, fill.a)),
        ]
    }
}
