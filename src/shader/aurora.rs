//! Animated aurora: flowing noise curtains over a starred sky.

use crate::config::AuroraParams;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::{mix3, smoothstep};
use crate::palette::gradient::GradientSpec;
use crate::random::noise::simplex2;
use crate::shader::program::FragmentShader;

/// The loop body evaluates at most this many curtains.
pub const MAX_CURTAINS: u32 = 5;

/// Uniforms of the animated variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuroraShader {
    /// Seconds since the animation started.
    pub time: f64,
    pub params: AuroraParams,
    pub color1: [f64; 3],
    pub color2: [f64; 3],
    /// Highlight hue blended in where the aurora is strongest.
    pub color3: [f64; 3],
}

impl AuroraShader {
    pub fn new(color1: [f64; 3], color2: [f64; 3], params: AuroraParams) -> Self {
        Self {
            time: 0.0,
            params,
            color1,
            color2,
            color3: derive_highlight(color1, color2),
        }
    }

    pub fn from_gradient(spec: &GradientSpec, params: AuroraParams) -> Self {
        Self::new(spec.c1.to_unit_rgb(), spec.c2.to_unit_rgb(), params)
    }
}

/// `min(1, (c1 + c2) * 0.65)` per channel.
pub fn derive_highlight(c1: [f64; 3], c2: [f64; 3]) -> [f64; 3] {
    [0, 1, 2].map(|k| ((c1[k] + c2[k]) * 0.65).min(1.0))
}

impl FragmentShader for AuroraShader {
    fn validate(&self) -> PosterResult<()> {
        self.params.validate()?;
        let colors_ok = [self.color1, self.color2, self.color3]
            .iter()
            .flatten()
            .all(|c| c.is_finite());
        if !colors_ok || !self.time.is_finite() {
            return Err(PosterError::shader("aurora uniforms must be finite"));
        }
        Ok(())
    }

    fn shade(&self, fc: [f64; 2], res: [f64; 2]) -> [f64; 4] {
        let p = &self.params;
        let aspect = res[0] / res[1];
        let t = self.time * p.speed;

        let center = [aspect * 0.5, 0.5];
        let uv = [
            center[0] + (fc[0] / res[0] * aspect - center[0]) / p.scale,
            center[1] + (fc[1] / res[1] - center[1]) / p.scale,
        ];

        let bg = p.background;
        let sky_top = [bg[0] + 0.02, bg[1] + 0.01, bg[2] + 0.04];
        let stars = (simplex2([fc[0] * 0.35, fc[1] * 0.35]) * 0.5 + 0.5).powf(22.0) * 0.8;
        let sky = mix3(bg, sky_top, uv[1]).map(|c| c + stars);

        let curtains = f64::from(p.curtains);
        let mut aurora = 0.0;
        let mut color_mix = 0.0;
        for n in 0..MAX_CURTAINS.min(p.curtains) {
            let i = f64::from(n);
            let offset = i * 1.3;
            let freq = 1.5 + i * 0.4;

            let wave = simplex2([uv[0] * freq + t * 0.3 + offset, t * 0.15 + i]) * 0.15
                + simplex2([uv[0] * freq * 2.0 - t * 0.2 + offset, t * 0.1 + i * 3.0]) * 0.08;
            let dist = uv[1] - (p.height + wave + i * 0.06);
            let mut curtain = smoothstep(0.3, 0.0, dist.abs()) * smoothstep(-0.02, 0.05, dist);

            let shimmer =
                (simplex2([uv[0] * 15.0 + i * 5.0, uv[1] * 3.0 + t * p.shimmer]) * 0.5 + 0.5).powi(2);
            curtain *= 0.6 + 0.4 * shimmer;

            let edge_fade = simplex2([uv[0] * 0.8 + t * 0.05 + i, i * 2.0]) * 0.5 + 0.5;
            curtain *= smoothstep(0.0, 0.3, edge_fade);

            aurora += curtain / (1.0 + i * 0.3);
            color_mix += curtain * (i / curtains);
        }

        let aurora = (aurora * p.intensity).clamp(0.0, 1.0);
        let color_mix = color_mix.clamp(0.0, 1.0);

        let tint = mix3(self.color1, self.color2, color_mix);
        let tint = mix3(tint, self.color3, aurora.powf(2.5) * 0.6);

        let mut col = [0, 1, 2].map(|k| sky[k] + tint[k] * aurora);
        if uv[1] < 0.15 {
            let reflection = (0.15 - uv[1]) / 0.15;
            for k in 0..3 {
                col[k] += tint[k] * aurora * reflection * 0.15;
            }
        }
        [col[0], col[1], col[2], 0.95]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/aurora.rs"]
mod tests;
