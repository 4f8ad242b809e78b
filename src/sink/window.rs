use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread::JoinHandle;

use minifb::{Key, Window, WindowOptions};

use crate::camera::ArrowKeys;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::render::FrameRGBA;
use crate::sink::{FrameGate, FrameSink, SinkConfig};

/// Presents frames in a desktop window.
///
/// `minifb::Window` is not `Send`, so the window lives on its own thread and frames are handed
/// over through a bounded channel as packed `0RGB` pixels. Held arrow keys travel back the
/// other way through a shared bit set.
pub struct WindowSink {
    title: String,
    gate: FrameGate,
    open: Arc<AtomicBool>,
    held: Arc<AtomicU8>,
    tx: Option<SyncSender<Vec<u32>>>,
    thread: Option<JoinHandle<RayframeResult<()>>>,
}

impl std::fmt::Debug for WindowSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowSink")
            .field("title", &self.title)
            .field("open", &self.is_open())
            .field("keys", &self.keys())
            .finish()
    }
}

impl WindowSink {
    /// Sink opening a window titled `title` on `begin`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            gate: FrameGate::default(),
            open: Arc::new(AtomicBool::new(false)),
            held: Arc::new(AtomicU8::new(0)),
            tx: None,
            thread: None,
        }
    }

    /// `false` once the window was closed or Escape was pressed.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Arrow keys held in the window as of its last update.
    pub fn keys(&self) -> ArrowKeys {
        ArrowKeys::from_bits(self.held.load(Ordering::Acquire))
    }
}

fn held_keys(window: &Window) -> ArrowKeys {
    ArrowKeys {
        up: window.is_key_down(Key::Up),
        down: window.is_key_down(Key::Down),
        left: window.is_key_down(Key::Left),
        right: window.is_key_down(Key::Right),
        shift: window.is_key_down(Key::LeftShift) || window.is_key_down(Key::RightShift),
    }
}

/// Pack RGBA8 bytes into `0RGB` words.
pub(crate) fn rgba_to_0rgb(data: &[u8]) -> Vec<u32> {
    data.chunks_exact(4)
        .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]))
        .collect()
}

fn window_loop(
    title: String,
    canvas: Canvas,
    open: Arc<AtomicBool>,
    held: Arc<AtomicU8>,
    rx: Receiver<Vec<u32>>,
) -> RayframeResult<()> {
    let (w, h) = (canvas.width as usize, canvas.height as usize);
    let mut window = Window::new(&title, w, h, WindowOptions::default())
        .map_err(|e| RayframeError::render(format!("failed to open window: {e}")))?;
    let mut buffer = vec![0u32; w * h];
    let result = loop {
        if !window.is_open() || window.is_key_down(Key::Escape) {
            break Ok(());
        }
        held.store(held_keys(&window).to_bits(), Ordering::Release);
        match rx.recv_timeout(std::time::Duration::from_millis(16)) {
            Ok(next) => buffer = next,
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break Ok(()),
        }
        if let Err(e) = window.update_with_buffer(&buffer, w, h) {
            break Err(RayframeError::render(format!("window update failed: {e}")));
        }
    };
    held.store(0, Ordering::Release);
    open.store(false, Ordering::Release);
    result
}

impl FrameSink for WindowSink {
    fn begin(&mut self, cfg: SinkConfig) -> RayframeResult<()> {
        self.gate.begin(cfg)?;
        let (tx, rx) = sync_channel(1);
        let open = Arc::clone(&self.open);
        open.store(true, Ordering::Release);
        let held = Arc::clone(&self.held);
        let title = self.title.clone();
        let thread = std::thread::Builder::new()
            .name("rayframe-window".into())
            .spawn(move || window_loop(title, cfg.canvas, open, held, rx))
            .map_err(|e| RayframeError::render(format!("failed to spawn window thread: {e}")))?;
        self.tx = Some(tx);
        self.thread = Some(thread);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RayframeResult<()> {
        self.gate.admit(idx, frame)?;
        if !self.is_open() {
            return Err(RayframeError::render("window is closed"));
        }
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| RayframeError::render("push_frame called before begin"))?;
        // A closed window drops the receiver; the next is_open check reports it.
        let _ = tx.send(rgba_to_0rgb(&frame.data));
        Ok(())
    }

    fn end(&mut self) -> RayframeResult<()> {
        self.tx = None;
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| RayframeError::render("window thread panicked"))?,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sink/window.rs"]
mod tests;
