use js_sys::{ArrayBuffer, Uint8Array, WebAssembly};
use log::error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use nesbridge_core::core::{ButtonId, EmulationCore, FrameRef, Session};
use nesbridge_core::error::InvalidRom;

use crate::js_error::describe;

#[wasm_bindgen(module = "/js/emulation_core.js")]
extern "C" {
    type EmuInterface;

    #[wasm_bindgen(static_method_of = EmuInterface, js_name = new, catch)]
    fn create(rom: &[u8]) -> Result<EmuInterface, JsValue>;

    #[wasm_bindgen(method)]
    fn get_frame(this: &EmuInterface) -> BufferStruct;

    #[wasm_bindgen(method)]
    fn set_button(this: &EmuInterface, port: u8, mask: u8, pressed: bool);

    #[wasm_bindgen(method, js_name = free)]
    fn release(this: &EmuInterface);

    type BufferStruct;

    #[wasm_bindgen(method, getter)]
    fn pointer(this: &BufferStruct) -> u32;

    #[wasm_bindgen(method, getter)]
    fn length(this: &BufferStruct) -> u32;

    #[wasm_bindgen(method, js_name = free)]
    fn release_buffer(this: &BufferStruct);

    #[wasm_bindgen(js_name = coreMemory)]
    fn core_memory() -> WebAssembly::Memory;
}

/// Emulation core compiled as its own wasm module.
///
/// Frames are referenced by (pointer, length) into the core's linear memory,
/// which is a different memory from ours.
pub struct JsEmulationCore {
    memory: WebAssembly::Memory,
}

impl JsEmulationCore {
    pub fn new() -> Self {
        Self {
            memory: core_memory(),
        }
    }
}

impl EmulationCore for JsEmulationCore {
    fn create_session(&self, rom: &[u8]) -> Result<Box<dyn Session>, InvalidRom> {
        let interface = EmuInterface::create(rom).map_err(|err| InvalidRom(describe(&err)))?;
        Ok(Box::new(JsSession {
            interface,
            memory: self.memory.clone(),
            scratch: Vec::new(),
        }))
    }
}

struct JsSession {
    interface: EmuInterface,
    memory: WebAssembly::Memory,
    // frame bytes copied out of the core's memory; reused every frame
    scratch: Vec<u8>,
}

impl Session for JsSession {
    fn pull_frame(&mut self) -> FrameRef<'_> {
        let frame = self.interface.get_frame();
        let (pointer, length) = (frame.pointer(), frame.length());
        frame.release_buffer();

        // The buffer object is re-fetched every frame: growing the core's
        // memory detaches the previous one.
        let buffer: ArrayBuffer = self.memory.buffer().unchecked_into();
        let end = u64::from(pointer) + u64::from(length);
        if end > u64::from(buffer.byte_length()) {
            error!(
                "frame {pointer:#x}+{length} lies outside core memory ({} bytes)",
                buffer.byte_length()
            );
            self.scratch.clear();
            return FrameRef::new(&self.scratch);
        }

        let view = Uint8Array::new_with_byte_offset_and_length(&buffer, pointer, length);
        self.scratch.resize(length as usize, 0);
        view.copy_to(&mut self.scratch);
        FrameRef::new(&self.scratch)
    }

    fn set_button(&mut self, button: ButtonId, pressed: bool) {
        self.interface
            .set_button(button.port.index(), button.button.mask(), pressed);
    }
}

impl Drop for JsSession {
    fn drop(&mut self) {
        self.interface.release();
    }
}
