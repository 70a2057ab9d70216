//! Frame sink trait and the built-in sinks.

use std::path::PathBuf;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{RicochetError, RicochetResult};
use crate::render::composite::unpremultiply;
use crate::render::surface::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Target presentation rate.
    pub fps: Fps,
}

/// Consumer of presented frames.
///
/// `push_frame` is called with strictly increasing [`FrameIndex`] values between one `begin`
/// and one `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RicochetResult<()>;
    /// Push one presented frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RicochetResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> RicochetResult<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn begin(&mut self, cfg: SinkConfig) -> RicochetResult<()> {
        (**self).begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RicochetResult<()> {
        (**self).push_frame(idx, frame)
    }

    fn end(&mut self) -> RicochetResult<()> {
        (**self).end()
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in presentation order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RicochetResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RicochetResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RicochetResult<()> {
        Ok(())
    }
}

/// Discards pixels, counts frames.
#[derive(Debug, Default)]
pub struct NullSink {
    frames: u64,
}

impl NullSink {
    /// Sink with a zero count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames pushed since `begin`.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for NullSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RicochetResult<()> {
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> RicochetResult<()> {
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> RicochetResult<()> {
        Ok(())
    }
}

/// Writes each frame to `<dir>/frame_NNNNNN.png`.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, created on `begin`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Path a given frame index is written to.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", idx.0))
    }

    /// PNG files written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RicochetResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            RicochetError::resource(format!(
                "failed to create png output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RicochetResult<()> {
        let mut data = frame.data.clone();
        if frame.premultiplied {
            for px in data.chunks_exact_mut(4) {
                let out = unpremultiply([px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&out);
            }
        }
        let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
            .ok_or_else(|| RicochetError::output("frame buffer does not match its dimensions"))?;
        let path = self.frame_path(idx);
        img.save(&path).map_err(|e| {
            RicochetError::output(format!("failed to write '{}': {e}", path.display()))
        })?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> RicochetResult<()> {
        tracing::debug!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
