//! Shared offscreen renderer for static poster thumbnails.
//!
//! One instance serves a whole batch: the fragment program is built lazily on the first
//! [`StaticPosterRenderer::render`], reused for every following thumbnail, and dropped by
//! [`StaticPosterRenderer::release`].

use crate::render::backend::FrameRGBA;
use crate::shader::glow::GlowShader;
use crate::shader::program::{FragmentShader, ShaderProgram};

/// Lifecycle of the shared renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    Ready,
}

#[derive(Debug)]
pub struct StaticPosterRenderer {
    program: Option<ShaderProgram<GlowShader>>,
    parallel: bool,
    builds: u32,
}

impl Default for StaticPosterRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl StaticPosterRenderer {
    pub fn new(parallel: bool) -> Self {
        Self {
            program: None,
            parallel,
            builds: 0,
        }
    }

    pub fn state(&self) -> RendererState {
        if self.program.is_some() {
            RendererState::Ready
        } else {
            RendererState::Uninitialized
        }
    }

    pub fn is_ready(&self) -> bool {
        self.program.is_some()
    }

    /// How many times a program has been constructed over this renderer's lifetime.
    pub fn builds(&self) -> u32 {
        self.builds
    }

    /// Render one static frame. `None` when the program cannot be built for these inputs.
    #[tracing::instrument(skip(self, params))]
    pub fn render(&mut self, params: &GlowShader, width: u32, height: u32) -> Option<FrameRGBA> {
        match self.program.as_mut() {
            Some(program) => {
                if let Err(e) = params.validate().and_then(|()| program.resize(width, height)) {
                    tracing::warn!(error = %e, "static thumbnail skipped");
                    return None;
                }
                *program.shader_mut() = *params;
            }
            None => {
                self.program = Some(ShaderProgram::try_build(*params, width, height)?);
                self.builds += 1;
                tracing::debug!(builds = self.builds, "static renderer ready");
            }
        }
        let program = self.program.as_ref()?;
        Some(program.render(self.parallel))
    }

    /// Tear down the program. Safe to call in any state.
    pub fn release(&mut self) {
        if self.program.take().is_some() {
            tracing::debug!("static renderer released");
        }
    }
}

impl Drop for StaticPosterRenderer {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/static_renderer.rs"]
mod tests;
