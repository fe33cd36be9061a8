use crate::random::prng::Lcg;
use crate::render::backend::FrameRGBA;

/// Add uniform noise in `[-strength, strength)` to the color channels of every pixel.
///
/// One draw per pixel, shared by R, G and B. Premultiplied frames are clamped to their alpha.
pub fn apply_grain(frame: &mut FrameRGBA, strength: f64, rng: &mut Lcg) {
    if strength <= 0.0 {
        return;
    }
    let premultiplied = frame.premultiplied;
    for px in frame.data.chunks_exact_mut(4) {
        let n = rng.range(-strength, strength);
        let ceiling = if premultiplied { f64::from(px[3]) } else { 255.0 };
        for c in &mut px[..3] {
            *c = (f64::from(*c) + n).clamp(0.0, ceiling).round_ties_even() as u8;
        }
    }
}
