//! The frame module contract.
//!
//! A frame module owns a [`LinearMemory`] and renders fixed-size RGBA8 frames into it. A host
//! reads the dimensions once, then after every [`FrameModule::render`] copies
//! `width * height * 4` bytes starting at [`FrameModule::output_buffer_pointer`] out of memory.

mod checkerboard;
mod memory;
mod raytracer;

pub use checkerboard::CheckerboardModule;
pub use memory::{DEFAULT_MAX_PAGES, LinearMemory, PAGE_SIZE};
pub use raytracer::{RaytracerModule, RenderMode};

use std::sync::Once;

use crate::foundation::error::{RayframeError, RayframeResult};

/// Bytes reserved at the start of module memory before the output buffer.
pub const HEADER_BYTES: usize = 1024;

/// A module that renders RGBA8 frames into its own linear memory.
pub trait FrameModule {
    /// One-time diagnostic setup. Calling it more than once is harmless.
    fn init_panic_hook(&mut self);

    /// Fixed frame width in pixels.
    fn width(&self) -> u32;

    /// Fixed frame height in pixels.
    fn height(&self) -> u32;

    /// (Re)populate the output buffer. May grow memory.
    fn render(&mut self) -> RayframeResult<()>;

    /// Byte offset into [`FrameModule::memory`] where the output buffer starts.
    fn output_buffer_pointer(&self) -> usize;

    /// The module's linear memory.
    fn memory(&self) -> &LinearMemory;
}

static PANIC_HOOK: Once = Once::new();

/// Route panics through `tracing` before the default hook runs. Installed at most once per
/// process.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let prev = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(%info, "frame module panicked");
            prev(info);
        }));
    });
}

/// Allocate module memory with room for the header and a `len`-byte output buffer.
pub(crate) fn memory_for_output(len: usize) -> RayframeResult<LinearMemory> {
    let total = HEADER_BYTES
        .checked_add(len)
        .ok_or_else(|| RayframeError::memory("output buffer overflows usize"))?;
    LinearMemory::new(LinearMemory::pages_for(total)?)
}

/// Write the render counter into the header so a host can tell frames apart.
pub(crate) fn write_header(memory: &mut LinearMemory, renders: u64) -> RayframeResult<()> {
    memory.write(0, &renders.to_le_bytes())
}

/// Render counter stored in a module's memory header.
pub fn read_render_count(memory: &LinearMemory) -> RayframeResult<u64> {
    let bytes = memory.read(0, 8)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Ok(u64::from_le_bytes(buf))
}
