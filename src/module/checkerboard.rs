use crate::foundation::core::Canvas;
use crate::foundation::error::RayframeResult;
use crate::module::{FrameModule, HEADER_BYTES, LinearMemory, install_panic_hook};
use crate::module::{memory_for_output, write_header};

/// Cheap frame module drawing a checkerboard whose colors swap on every render.
///
/// Useful for exercising hosts and sinks without tracing rays.
#[derive(Clone, Debug)]
pub struct CheckerboardModule {
    canvas: Canvas,
    square: u32,
    memory: LinearMemory,
    renders: u64,
}

impl CheckerboardModule {
    /// Light square color (RGBA).
    pub const LIGHT: [u8; 4] = [0xee, 0xee, 0xee, 0xff];
    /// Dark square color (RGBA).
    pub const DARK: [u8; 4] = [0x22, 0x22, 0x22, 0xff];

    /// Checkerboard of `canvas` size with `square`-pixel squares.
    pub fn new(canvas: Canvas, square: u32) -> RayframeResult<Self> {
        canvas.validate()?;
        Ok(Self {
            canvas,
            square: square.max(1),
            memory: memory_for_output(canvas.checked_rgba_len()?)?,
            renders: 0,
        })
    }

    /// Color of pixel `(x, row)` after `renders` renders.
    pub fn color_at(&self, x: u32, row: u32, renders: u64) -> [u8; 4] {
        let parity = (x / self.square + row / self.square) as u64 + renders;
        if parity % 2 == 0 {
            Self::LIGHT
        } else {
            Self::DARK
        }
    }
}

impl FrameModule for CheckerboardModule {
    fn init_panic_hook(&mut self) {
        install_panic_hook();
    }

    fn width(&self) -> u32 {
        self.canvas.width
    }

    fn height(&self) -> u32 {
        self.canvas.height
    }

    fn render(&mut self) -> RayframeResult<()> {
        let phase = self.renders + 1;
        let len = self.canvas.rgba_len();
        let width = self.canvas.width as usize;
        let colors: Vec<[u8; 4]> = (0..self.canvas.pixel_count())
            .map(|i| self.color_at((i % width) as u32, (i / width) as u32, phase))
            .collect();
        let out = self.memory.slice_mut(HEADER_BYTES, len)?;
        for (px, c) in out.chunks_exact_mut(4).zip(colors) {
            px.copy_from_slice(&c);
        }
        self.renders = phase;
        write_header(&mut self.memory, self.renders)
    }

    fn output_buffer_pointer(&self) -> usize {
        HEADER_BYTES
    }

    fn memory(&self) -> &LinearMemory {
        &self.memory
    }
}

#[cfg(test)]
#[path = "../../tests/unit/module/checkerboard.rs"]
mod tests;
