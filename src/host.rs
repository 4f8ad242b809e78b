//! Native loader for frame modules.
//!
//! The host mirrors what a browser page does with a compiled module: read the dimensions once,
//! allocate a matching surface, then per frame call `render`, take a fresh view of module memory,
//! copy the output buffer into the surface and paint it.

use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::module::FrameModule;
use crate::render::FrameRGBA;
use crate::sink::{FrameSink, SinkConfig};

/// Drives a [`FrameModule`] and paints its frames into a [`FrameSink`].
pub struct FrameHost<M, S> {
    module: M,
    sink: S,
    canvas: Canvas,
    surface: FrameRGBA,
    next: FrameIndex,
    finished: bool,
}

impl<M: FrameModule, S: FrameSink> FrameHost<M, S> {
    /// Initialize `module`, size the surface from its dimensions and open `sink`.
    #[tracing::instrument(skip_all)]
    pub fn load(mut module: M, mut sink: S) -> RayframeResult<Self> {
        module.init_panic_hook();
        let canvas = Canvas::new(module.width(), module.height());
        canvas.validate()?;
        sink.begin(SinkConfig { canvas })?;
        tracing::info!(width = canvas.width, height = canvas.height, "frame module loaded");
        Ok(Self {
            module,
            sink,
            canvas,
            surface: FrameRGBA::blank(canvas),
            next: FrameIndex(0),
            finished: false,
        })
    }

    /// Surface dimensions, equal to the module's reported size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Most recently painted surface (all zero before the first frame).
    pub fn surface(&self) -> &FrameRGBA {
        &self.surface
    }

    /// The hosted module.
    pub fn module(&self) -> &M {
        &self.module
    }

    /// Mutable access to the hosted module (e.g. to move its camera).
    pub fn module_mut(&mut self) -> &mut M {
        &mut self.module
    }

    /// The sink frames are painted into.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Index the next painted frame will get.
    pub fn next_frame(&self) -> FrameIndex {
        self.next
    }

    /// Render, copy and paint one frame; returns its index.
    pub fn draw_frame(&mut self) -> RayframeResult<FrameIndex> {
        if self.finished {
            return Err(RayframeError::render("host already finished"));
        }
        self.module.render()?;

        let ptr = self.module.output_buffer_pointer();
        let len = self.canvas.rgba_len();
        // Memory may have grown during render: always take a fresh view.
        let memory = self.module.memory().view();
        let bytes = ptr
            .checked_add(len)
            .and_then(|end| memory.get(ptr..end))
            .ok_or_else(|| {
                RayframeError::memory(format!(
                    "output buffer [{ptr}, {ptr} + {len}) exceeds module memory of {} bytes",
                    memory.len()
                ))
            })?;
        self.surface.data.copy_from_slice(bytes);

        let idx = self.next;
        self.sink.push_frame(idx, &self.surface)?;
        self.next = FrameIndex(idx.0 + 1);
        tracing::debug!(frame = idx.0, ptr, "frame painted");
        Ok(idx)
    }

    /// Draw `frames` frames, then close the sink.
    ///
    /// The sink is closed even when a frame fails; the frame error is returned.
    pub fn run(&mut self, frames: u64) -> RayframeResult<()> {
        for _ in 0..frames {
            if let Err(err) = self.draw_frame() {
                if let Err(end_err) = self.finish() {
                    tracing::warn!(error = %end_err, "closing sink after a failed frame");
                }
                return Err(err);
            }
        }
        self.finish()
    }

    /// Close the sink. Further frames are rejected.
    pub fn finish(&mut self) -> RayframeResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.sink.end()
    }

    /// Give back the module and the sink.
    pub fn into_parts(self) -> (M, S) {
        (self.module, self.sink)
    }
}
