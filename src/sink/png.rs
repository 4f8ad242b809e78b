use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::RayframeResult;
use crate::render::FrameRGBA;
use crate::sink::{FrameGate, FrameSink, SinkConfig};

#[derive(Debug, Clone)]
enum Target {
    Dir(PathBuf),
    Single(PathBuf),
}

/// Writes frames as PNG files.
#[derive(Debug)]
pub struct PngSink {
    target: Target,
    gate: FrameGate,
    written: Vec<PathBuf>,
}

impl PngSink {
    /// One `frame_{idx:05}.png` per frame inside `dir` (created on `begin`).
    pub fn dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_target(Target::Dir(dir.into()))
    }

    /// Every frame overwrites `path`; the last one painted wins.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::with_target(Target::Single(path.into()))
    }

    fn with_target(target: Target) -> Self {
        Self {
            target,
            gate: FrameGate::default(),
            written: Vec::new(),
        }
    }

    /// File name used for frame `idx` in directory mode.
    pub fn frame_file_name(idx: FrameIndex) -> String {
        format!("frame_{:05}.png", idx.0)
    }

    /// Paths written so far, in push order (repeats in single mode).
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn path_for(&self, idx: FrameIndex) -> PathBuf {
        match &self.target {
            Target::Dir(dir) => dir.join(Self::frame_file_name(idx)),
            Target::Single(path) => path.clone(),
        }
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

impl FrameSink for PngSink {
    fn begin(&mut self, cfg: SinkConfig) -> RayframeResult<()> {
        self.gate.begin(cfg)?;
        self.written.clear();
        match &self.target {
            Target::Dir(dir) => std::fs::create_dir_all(dir)
                .with_context(|| format!("create output directory '{}'", dir.display()))?,
            Target::Single(path) => ensure_parent(path)?,
        }
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RayframeResult<()> {
        let canvas = self.gate.admit(idx, frame)?;
        let path = self.path_for(idx);
        image::save_buffer_with_format(
            &path,
            &frame.data,
            canvas.width,
            canvas.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::debug!(frame = idx.0, path = %path.display(), "png written");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> RayframeResult<()> {
        Ok(())
    }
}
