//! Static single-frame variant: two noisy radial glows, grain and a vignette.

use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::{mix3, smoothstep};
use crate::palette::gradient::GradientSpec;
use crate::random::noise::{hash2, simplex2};
use crate::random::seed::Seed;
use crate::shader::program::FragmentShader;

pub const DEFAULT_BACKGROUND: [f64; 3] = [0.0, 0.0, 0.02];

/// Uniforms of the static thumbnail shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowShader {
    pub seed: f64,
    pub color1: [f64; 3],
    pub color2: [f64; 3],
    pub background: [f64; 3],
    /// Glow centers in `0..1` surface fractions.
    pub glow1: [f64; 2],
    pub glow2: [f64; 2],
}

impl GlowShader {
    pub fn from_gradient(spec: &GradientSpec, seed: Seed) -> Self {
        let [glow1, glow2] = spec.glow_positions();
        Self {
            seed: seed.shader_seed(),
            color1: spec.c1.to_unit_rgb(),
            color2: spec.c2.to_unit_rgb(),
            background: DEFAULT_BACKGROUND,
            glow1,
            glow2,
        }
    }

    pub fn for_date(date: &str) -> Self {
        let seed = Seed::from_date(date);
        Self::from_gradient(&GradientSpec::from_seed(seed), seed)
    }
}

impl FragmentShader for GlowShader {
    fn validate(&self) -> PosterResult<()> {
        let ok = std::iter::once(self.seed)
            .chain(self.color1)
            .chain(self.color2)
            .chain(self.background)
            .chain(self.glow1)
            .chain(self.glow2)
            .all(f64::is_finite);
        if !ok {
            return Err(PosterError::shader("glow uniforms must be finite"));
        }
        Ok(())
    }

    fn shade(&self, fc: [f64; 2], res: [f64; 2]) -> [f64; 4] {
        let seed = self.seed;
        let uv = [fc[0] / res[0], fc[1] / res[1]];

        let bg = self.background;
        let sky_top = [bg[0] + 0.02, bg[1] + 0.01, bg[2] + 0.04];
        let stars = (simplex2([fc[0] * 0.35 + seed * 10.0, fc[1] * 0.35 + seed * 10.0]) * 0.5
            + 0.5)
            .powf(22.0)
            * 0.8;
        let sky = mix3(bg, sky_top, uv[1]).map(|c| c + stars);

        let d1 = distance(uv, self.glow1);
        let warp1 = simplex2([uv[0] * 3.0 + seed, uv[1] * 3.0 + seed]) * 0.12;
        let glow1 = smoothstep(0.65, 0.0, d1 + warp1)
            * (simplex2([uv[0] * 4.0 + seed * 2.0, uv[1] * 4.0 + seed * 2.0]) * 0.25 + 0.75);

        let d2 = distance(uv, self.glow2);
        let warp2 = simplex2([uv[0] * 2.5 - seed * 1.5, uv[1] * 2.5 - seed * 1.5]) * 0.12;
        let glow2 = smoothstep(0.55, 0.0, d2 + warp2)
            * (simplex2([uv[0] * 3.5 - seed * 3.0, uv[1] * 3.5 - seed * 3.0]) * 0.25 + 0.75);

        let g1 = glow1.max(0.0).powf(1.5) * 0.7;
        let g2 = glow2.max(0.0).powf(1.5) * 0.6;
        let mut col = [0, 1, 2].map(|k| sky[k] + self.color1[k] * g1 + self.color2[k] * g2);

        let edge = smoothstep(0.0, 0.25, uv[0])
            * smoothstep(1.0, 0.75, uv[0])
            * smoothstep(0.0, 0.15, uv[1])
            * smoothstep(1.0, 0.85, uv[1]);
        let grain_cell = [(uv[0] * 200.0).floor() + seed, (uv[1] * 200.0).floor() + seed];
        let grain = (hash2(grain_cell) - 0.5) * 0.28;
        for c in &mut col {
            *c = *c * (0.4 + 0.6 * edge) + grain;
        }
        [col[0], col[1], col[2], 0.95]
    }
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}
