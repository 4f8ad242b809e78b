//! Display surfaces a host paints frames into.

mod png;
mod ppm;
#[cfg(feature = "window")]
mod window;

pub use png::PngSink;
pub use ppm::{PpmSink, encode_ppm};
#[cfg(feature = "window")]
pub use window::WindowSink;

use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::render::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Dimensions every pushed frame must have.
    pub canvas: Canvas,
}

/// Sink contract for consuming presented frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing [`FrameIndex`] values.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RayframeResult<()>;
    /// Paint one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RayframeResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> RayframeResult<()>;
}

/// Ordering and size checks shared by the sinks in this module.
#[derive(Debug, Default)]
pub(crate) struct FrameGate {
    cfg: Option<SinkConfig>,
    last: Option<FrameIndex>,
}

impl FrameGate {
    pub(crate) fn begin(&mut self, cfg: SinkConfig) -> RayframeResult<()> {
        cfg.canvas.validate()?;
        self.cfg = Some(cfg);
        self.last = None;
        Ok(())
    }

    pub(crate) fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Validate `frame` against the configured size and the previous index.
    pub(crate) fn admit(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RayframeResult<Canvas> {
        let cfg = self
            .cfg
            .ok_or_else(|| RayframeError::render("push_frame called before begin"))?;
        if frame.canvas() != cfg.canvas || frame.data.len() != cfg.canvas.rgba_len() {
            return Err(RayframeError::render(format!(
                "frame {} is {}x{} ({} bytes), sink expects {}x{}",
                idx.0,
                frame.width,
                frame.height,
                frame.data.len(),
                cfg.canvas.width,
                cfg.canvas.height
            )));
        }
        if let Some(last) = self.last
            && idx <= last
        {
            return Err(RayframeError::render(format!(
                "frame index {} is not after {}",
                idx.0, last.0
            )));
        }
        self.last = Some(idx);
        Ok(cfg.canvas)
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    gate: FrameGate,
    ended: bool,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.gate.config()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RayframeResult<()> {
        self.gate.begin(cfg)?;
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RayframeResult<()> {
        self.gate.admit(idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RayframeResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sink/memory.rs"]
mod tests;
