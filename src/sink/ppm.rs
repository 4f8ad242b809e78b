use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::RayframeResult;
use crate::render::FrameRGBA;
use crate::sink::{FrameGate, FrameSink, SinkConfig};

/// Writes the last painted frame as a plain-text (P3) PPM file.
///
/// Each frame overwrites the file, so the result after `end` is the final frame.
#[derive(Debug)]
pub struct PpmSink {
    path: PathBuf,
    gate: FrameGate,
}

impl PpmSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gate: FrameGate::default(),
        }
    }

    /// Output path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

/// Encode `frame` as P3 text: header, then one `r g b` line per pixel, top row first.
///
/// Alpha is dropped.
pub fn encode_ppm(frame: &FrameRGBA) -> String {
    let mut out = String::with_capacity(16 + frame.data.len() * 3);
    let _ = write!(out, "P3\n{} {}\n255\n", frame.width, frame.height);
    for px in frame.data.chunks_exact(4) {
        let _ = writeln!(out, "{} {} {}", px[0], px[1], px[2]);
    }
    out
}

impl FrameSink for PpmSink {
    fn begin(&mut self, cfg: SinkConfig) -> RayframeResult<()> {
        self.gate.begin(cfg)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
        }
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RayframeResult<()> {
        self.gate.admit(idx, frame)?;
        std::fs::write(&self.path, encode_ppm(frame))
            .with_context(|| format!("write ppm '{}'", self.path.display()))?;
        tracing::debug!(frame = idx.0, path = %self.path.display(), "ppm written");
        Ok(())
    }

    fn end(&mut self) -> RayframeResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sink/ppm.rs"]
mod tests;
