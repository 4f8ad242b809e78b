//! `wasm32` exports of the frame module contract.
//!
//! All exports share one lazily built [`RaytracerModule`] over the demo scene. The output pointer
//! is an absolute address in wasm linear memory, so a loader can read the frame with
//! `new Uint8Array(memory.buffer, ptr, width * height * 4)`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::module::{FrameModule, RaytracerModule, RenderMode};

thread_local! {
    static MODULE: RefCell<Option<RaytracerModule>> = const { RefCell::new(None) };
}

fn with_module<T>(f: impl FnOnce(&mut RaytracerModule) -> Result<T, JsValue>) -> Result<T, JsValue> {
    MODULE.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let module = RaytracerModule::demo(RenderMode::default())
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            *slot = Some(module);
        }
        match slot.as_mut() {
            Some(m) => f(m),
            None => Err(JsValue::from_str("frame module not initialized")),
        }
    })
}

/// Forward Rust panics to the browser console.
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Frame width in pixels.
#[wasm_bindgen]
pub fn get_width() -> Result<u32, JsValue> {
    with_module(|m| Ok(m.width()))
}

/// Frame height in pixels.
#[wasm_bindgen]
pub fn get_height() -> Result<u32, JsValue> {
    with_module(|m| Ok(m.height()))
}

/// Render one frame into the output buffer.
#[wasm_bindgen]
pub fn render() -> Result<(), JsValue> {
    with_module(|m| m.render().map_err(|e| JsValue::from_str(&e.to_string())))
}

/// Address of the first output byte in wasm linear memory.
///
/// Memory may grow during [`render`]; callers must re-read `memory.buffer` afterwards.
#[wasm_bindgen]
pub fn get_output_buffer_pointer() -> Result<usize, JsValue> {
    with_module(|m| {
        let base = m.memory().view().as_ptr() as usize;
        Ok(base.wrapping_add(m.output_buffer_pointer()))
    })
}
