//! Procedural noise shared by the canvas heatmap and the shader programs.

use crate::foundation::math::fract;
use crate::random::prng::Lcg;

const TABLE_BITS: u32 = 12;
const TABLE_MASK: usize = (1 << TABLE_BITS) - 1;
const Y_WRAP_BITS: u32 = 4;
const Y_WRAP: i64 = 1 << Y_WRAP_BITS;
const OCTAVES: u32 = 4;
const FALLOFF: f64 = 0.5;

/// Seeded 2D value noise with cosine interpolation and four octaves.
///
/// Output lies in `[0, 0.9375)`: the octave amplitudes start at `0.5` and halve.
#[derive(Clone, Debug)]
pub struct ValueNoise {
    table: Vec<f64>,
}

impl ValueNoise {
    pub fn seeded(seed: u32) -> Self {
        let mut rng = Lcg::new(seed);
        let table = (0..=TABLE_MASK).map(|_| rng.next_f64()).collect();
        Self { table }
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (x, y) = (x.abs(), y.abs());
        let mut xi = x.floor() as i64;
        let mut yi = y.floor() as i64;
        let mut xf = x - xi as f64;
        let mut yf = y - yi as f64;

        let at = |i: i64| self.table[(i as usize) & TABLE_MASK];
        let mut r = 0.0;
        let mut ampl = 0.5;
        for _ in 0..OCTAVES {
            let of = xi + (yi << Y_WRAP_BITS);
            let rxf = scaled_cosine(xf);
            let ryf = scaled_cosine(yf);

            let mut n1 = at(of);
            n1 += rxf * (at(of + 1) - n1);
            let mut n2 = at(of + Y_WRAP);
            n2 += rxf * (at(of + Y_WRAP + 1) - n2);
            n1 += ryf * (n2 - n1);

            r += n1 * ampl;
            ampl *= FALLOFF;
            xi <<= 1;
            xf *= 2.0;
            yi <<= 1;
            yf *= 2.0;
            if xf >= 1.0 {
                xi += 1;
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi += 1;
                yf -= 1.0;
            }
        }
        r
    }
}

fn scaled_cosine(i: f64) -> f64 {
    0.5 * (1.0 - (i * std::f64::consts::PI).cos())
}

fn mod289(x: f64) -> f64 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: f64) -> f64 {
    mod289(((x * 34.0) + 1.0) * x)
}

/// 2D simplex noise (Ashima/McEwan formulation), output roughly in `[-1, 1]`.
pub(crate) fn simplex2(v: [f64; 2]) -> f64 {
    const C: [f64; 4] = [
        0.211_324_865_405_187,
        0.366_025_403_784_439,
        -0.577_350_269_189_626,
        0.024_390_243_902_439,
    ];

    let s = (v[0] + v[1]) * C[1];
    let i = [(v[0] + s).floor(), (v[1] + s).floor()];
    let t = (i[0] + i[1]) * C[0];
    let x0 = [v[0] - i[0] + t, v[1] - i[1] + t];
    let i1 = if x0[0] > x0[1] { [1.0, 0.0] } else { [0.0, 1.0] };

    let x12 = [
        x0[0] + C[0] - i1[0],
        x0[1] + C[0] - i1[1],
        x0[0] + C[2],
        x0[1] + C[2],
    ];

    let i = [mod289(i[0]), mod289(i[1])];
    let py = [
        permute(i[1]),
        permute(i[1] + i1[1]),
        permute(i[1] + 1.0),
    ];
    let p = [
        permute(py[0] + i[0]),
        permute(py[1] + i[0] + i1[0]),
        permute(py[2] + i[0] + 1.0),
    ];

    let mut m = [
        (0.5 - (x0[0] * x0[0] + x0[1] * x0[1])).max(0.0),
        (0.5 - (x12[0] * x12[0] + x12[1] * x12[1])).max(0.0),
        (0.5 - (x12[2] * x12[2] + x12[3] * x12[3])).max(0.0),
    ];
    for mk in &mut m {
        *mk = *mk * *mk;
        *mk = *mk * *mk;
    }

    let corners = [(x0[0], x0[1]), (x12[0], x12[1]), (x12[2], x12[3])];
    let mut dot = 0.0;
    for k in 0..3 {
        let x = 2.0 * fract(p[k] * C[3]) - 1.0;
        let h = x.abs() - 0.5;
        let a0 = x - (x + 0.5).floor();
        let mk = m[k] * (1.792_842_914_001_59 - 0.853_734_720_953_14 * (a0 * a0 + h * h));
        let g = a0 * corners[k].0 + h * corners[k].1;
        dot += mk * g;
    }
    130.0 * dot
}

/// `fract(sin(dot(p, (127.1, 311.7))) * 43758.5453123)`.
pub(crate) fn hash2(p: [f64; 2]) -> f64 {
    fract((p[0] * 127.1 + p[1] * 311.7).sin() * 43_758.545_312_3)
}

#[cfg(test)]
#[path = "../../tests/unit/random/noise.rs"]
mod tests;
