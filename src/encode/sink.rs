use std::path::{Path, PathBuf};

use crate::encode::png::write_png;
use crate::foundation::error::{PosterError, PosterResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    /// Nominal frames per second of the producer.
    pub fps: u32,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices between `begin`
/// and `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> PosterResult<()>;
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> PosterResult<()>;
    fn end(&mut self) -> PosterResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PosterResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> PosterResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> PosterResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every frame as `frame-00000.png`, `frame-00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: usize,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            written: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn frame_path(&self, idx: u64) -> PathBuf {
        self.dir.join(format!("frame-{idx:05}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> PosterResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(PosterError::validation("sink width/height must be non-zero"));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            PosterError::io(format!(
                "failed to create frame directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> PosterResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(PosterError::validation("push_frame called before begin"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(PosterError::validation(format!(
                "frame {}x{} does not match sink {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        write_png(frame, &self.frame_path(idx))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> PosterResult<()> {
        tracing::debug!(dir = %self.dir.display(), frames = self.written, "png sequence done");
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
