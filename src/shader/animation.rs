//! Frame loop for the animated aurora.
//!
//! One [`AuroraLoop`] owns one shader program. Each [`AuroraLoop::tick`] advances the uniform
//! time from its [`FrameClock`] and shades a frame; once its [`CancelHandle`] fires the loop
//! stops and drops the program.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::PosterResult;
use crate::render::backend::FrameRGBA;
use crate::shader::aurora::AuroraShader;
use crate::shader::program::ShaderProgram;

/// Source of the shader's `time` uniform, in seconds.
#[derive(Clone, Debug)]
pub enum FrameClock {
    /// Wall-clock time since the first tick.
    System { start: Option<Instant> },
    /// `frame / fps`, independent of wall time.
    FixedStep { fps: u32, frame: u64 },
}

impl FrameClock {
    pub fn system() -> Self {
        Self::System { start: None }
    }

    pub fn fixed_step(fps: u32) -> Self {
        Self::FixedStep {
            fps: fps.max(1),
            frame: 0,
        }
    }

    pub fn fps(&self) -> u32 {
        match self {
            Self::System { .. } => 60,
            Self::FixedStep { fps, .. } => *fps,
        }
    }

    /// Time for the next frame.
    pub fn advance(&mut self) -> f64 {
        match self {
            Self::System { start } => {
                start.get_or_insert_with(Instant::now).elapsed().as_secs_f64()
            }
            Self::FixedStep { fps, frame } => {
                let t = *frame as f64 / f64::from(*fps);
                *frame += 1;
                t
            }
        }
    }
}

/// Shared stop flag for a running loop.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct AuroraLoop {
    program: Option<ShaderProgram<AuroraShader>>,
    clock: FrameClock,
    cancel: CancelHandle,
    frames: u64,
    parallel: bool,
}

impl AuroraLoop {
    /// Build the loop's program. `None` when the shader cannot run on this surface.
    pub fn start(
        shader: AuroraShader,
        width: u32,
        height: u32,
        clock: FrameClock,
        parallel: bool,
    ) -> Option<Self> {
        let program = ShaderProgram::try_build(shader, width, height)?;
        Some(Self {
            program: Some(program),
            clock,
            cancel: CancelHandle::new(),
            frames: 0,
            parallel,
        })
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        self.program.is_some() && !self.cancel.is_cancelled()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.program.as_ref().map(ShaderProgram::size)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> PosterResult<()> {
        match self.program.as_mut() {
            Some(p) => p.resize(width, height),
            None => Ok(()),
        }
    }

    /// Shade the next frame, or stop and release when cancelled.
    pub fn tick(&mut self) -> Option<FrameRGBA> {
        if self.cancel.is_cancelled() {
            self.stop();
            return None;
        }
        let program = self.program.as_mut()?;
        program.shader_mut().time = self.clock.advance();
        let frame = program.render(self.parallel);
        self.frames += 1;
        Some(frame)
    }

    /// Drive the loop into `sink` until cancelled or `max_frames` frames were pushed.
    #[tracing::instrument(skip(self, sink))]
    pub fn run(&mut self, sink: &mut dyn FrameSink, max_frames: Option<u64>) -> PosterResult<u64> {
        let Some((width, height)) = self.size() else {
            return Ok(0);
        };
        sink.begin(SinkConfig {
            width,
            height,
            fps: self.clock.fps(),
        })?;
        let mut pushed = 0u64;
        while max_frames.is_none_or(|max| pushed < max) {
            let Some(frame) = self.tick() else {
                break;
            };
            sink.push_frame(pushed, &frame)?;
            pushed += 1;
        }
        sink.end()?;
        tracing::debug!(
            frames = pushed,
            cancelled = self.cancel.is_cancelled(),
            "aurora loop done"
        );
        Ok(pushed)
    }

    /// Cancel and release the program. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if self.program.take().is_some() {
            tracing::debug!(frames = self.frames, "aurora loop released");
        }
    }
}

impl Drop for AuroraLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/animation.rs"]
mod tests;
