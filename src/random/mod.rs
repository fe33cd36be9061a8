//! Seed derivation, the explicit LCG and value noise.

pub mod noise;
pub mod prng;
pub mod seed;
