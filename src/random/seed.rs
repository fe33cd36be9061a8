use crate::random::prng::Lcg;

const DIFFUSE_A: f64 = 9301.0;
const DIFFUSE_B: f64 = 49297.0;
const DIFFUSE_M: f64 = 233_280.0;

/// Stream ids for [`Seed::stream`].
pub mod streams {
    pub const GRAIN: u32 = 1;
    pub const SENTIMENT: u32 = 2;
    pub const HEATMAP_NOISE: u32 = 3;
}

/// Seed derived from a poster date.
///
/// `raw` is the date with separators stripped (`"2026-01-31"` -> `20260131`). `diffused` spreads
/// adjacent dates far apart and is the canonical seed for every layout, typography and grain
/// stream. The gradient sampler keys off `raw`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Seed {
    raw: i64,
    diffused: u32,
}

impl Seed {
    /// Derive a seed from a `YYYY-MM-DD` string. Unparseable input falls back to raw `0`.
    pub fn from_date(date: &str) -> Self {
        Self::from_raw(parse_raw(date))
    }

    pub fn from_raw(raw: i64) -> Self {
        Self {
            raw,
            diffused: diffuse(raw),
        }
    }

    pub fn raw(self) -> i64 {
        self.raw
    }

    pub fn diffused(self) -> u32 {
        self.diffused
    }

    /// Fresh PRNG for the layout pass.
    pub fn layout_rng(self) -> Lcg {
        Lcg::new(self.diffused)
    }

    /// Independent PRNG for a secondary pass (grain, sentiment jitter, ...).
    pub fn stream(self, stream: u32) -> Lcg {
        Lcg::fork(self.diffused, stream)
    }

    /// Integer seed behind [`Seed::stream`], for generators that take a raw seed.
    pub fn stream_seed(self, stream: u32) -> u32 {
        Lcg::fork_seed(self.diffused, stream)
    }

    /// Scalar seed uniform for the static glow shader, kept small so noise lookups stay precise.
    pub fn shader_seed(self) -> f64 {
        f64::from(self.diffused) / DIFFUSE_M * 100.0
    }
}

/// Strip `-` separators and parse the leading digits (lenient, like `parseInt`).
fn parse_raw(date: &str) -> i64 {
    let stripped: String = date.trim().chars().filter(|&c| c != '-').collect();
    let digits = stripped.strip_prefix('+').unwrap_or(&stripped);

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        value = match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(d)))
        {
            Some(v) => v,
            None => return 0,
        };
    }
    value
}

/// `floor(|sin(raw * A + B)| * M)`.
fn diffuse(raw: i64) -> u32 {
    let x = (raw as f64) * DIFFUSE_A + DIFFUSE_B;
    (x.sin().abs() * DIFFUSE_M).floor() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/random/seed.rs"]
mod tests;
