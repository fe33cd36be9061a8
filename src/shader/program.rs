//! Software fragment programs.
//!
//! A [`FragmentShader`] is evaluated once per pixel with GL conventions: `frag_coord` has a
//! bottom-left origin and pixel centers at `+0.5`. Output is straight-alpha RGBA in `0..=1`.

use rayon::prelude::*;

use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::unit_to_u8;
use crate::render::backend::FrameRGBA;

/// Largest surface a program accepts on either axis.
pub const MAX_SURFACE_PX: u32 = 8192;

pub trait FragmentShader: Sync {
    /// Reject uniforms the shader cannot evaluate.
    fn validate(&self) -> PosterResult<()>;

    fn shade(&self, frag_coord: [f64; 2], resolution: [f64; 2]) -> [f64; 4];
}

/// A shader with validated uniforms bound to a surface size.
#[derive(Clone, Debug)]
pub struct ShaderProgram<S> {
    shader: S,
    width: u32,
    height: u32,
}

impl<S: FragmentShader> ShaderProgram<S> {
    pub fn build(shader: S, width: u32, height: u32) -> PosterResult<Self> {
        if width == 0 || height == 0 || width > MAX_SURFACE_PX || height > MAX_SURFACE_PX {
            return Err(PosterError::shader(format!(
                "surface {width}x{height} outside 1..={MAX_SURFACE_PX}"
            )));
        }
        shader.validate()?;
        Ok(Self {
            shader,
            width,
            height,
        })
    }

    /// [`ShaderProgram::build`], treating failure as a missing capability.
    pub fn try_build(shader: S, width: u32, height: u32) -> Option<Self> {
        match Self::build(shader, width, height) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!(error = %e, "shader program unavailable");
                None
            }
        }
    }

    pub fn shader(&self) -> &S {
        &self.shader
    }

    pub fn shader_mut(&mut self) -> &mut S {
        &mut self.shader
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Change the bound surface size (a viewport change).
    pub fn resize(&mut self, width: u32, height: u32) -> PosterResult<()> {
        if width == 0 || height == 0 || width > MAX_SURFACE_PX || height > MAX_SURFACE_PX {
            return Err(PosterError::shader(format!(
                "surface {width}x{height} outside 1..={MAX_SURFACE_PX}"
            )));
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Shade every pixel into a straight-alpha frame, top row first.
    pub fn render(&self, parallel: bool) -> FrameRGBA {
        let (w, h) = (self.width as usize, self.height as usize);
        let resolution = [f64::from(self.width), f64::from(self.height)];
        let mut data = vec![0u8; w * h * 4];

        let shade_row = |(row, out): (usize, &mut [u8])| {
            let fy = (h - 1 - row) as f64 + 0.5;
            for (x, px) in out.chunks_exact_mut(4).enumerate() {
                let c = self.shader.shade([x as f64 + 0.5, fy], resolution);
                for k in 0..4 {
                    px[k] = unit_to_u8(c[k]);
                }
            }
        };

        if parallel {
            data.par_chunks_mut(w * 4).enumerate().for_each(shade_row);
        } else {
            data.chunks_mut(w * 4).enumerate().for_each(shade_row);
        }

        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}
