//! Deterministic linear congruential generator.
//!
//! Parameters are the classic p5-style LCG
//! (`m = 2^32`, `a = 1664525`, `c = 1013904223`), so identical seeds replay identical
//! sequences. Every pass owns its own instance; nothing here is process-global.

const LCG_M: u64 = 1 << 32;
const LCG_A: u64 = 1_664_525;
const LCG_C: u64 = 1_013_904_223;

/// Seeded pseudo-random stream of `f64` values in `[0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator already seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Reset the stream; subsequent draws replay from the start.
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let next = (LCG_A * u64::from(self.state) + LCG_C) % LCG_M;
        self.state = next as u32;
        next as f64 / LCG_M as f64
    }

    /// `next * max`, i.e. a value in `[0, max)`.
    pub fn below(&mut self, max: f64) -> f64 {
        self.next_f64() * max
    }

    /// Uniform value between `min` and `max`; swapped bounds are normalized first.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };
        self.next_f64() * (hi - lo) + lo
    }

    /// Derive an independent stream for a named pass from the same seed.
    pub fn fork(seed: u32, stream: u32) -> Self {
        Self::new(Self::fork_seed(seed, stream))
    }

    /// Seed value [`Lcg::fork`] starts from.
    pub fn fork_seed(seed: u32, stream: u32) -> u32 {
        let mut h = crate::foundation::math::Fnv1a64::new_default();
        h.write_u64(u64::from(seed));
        h.write_u64(u64::from(stream));
        (h.finish() & 0xFFFF_FFFF) as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/random/prng.rs"]
mod tests;
