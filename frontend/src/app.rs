//! The object a page script constructs to run the bridge.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Uint8Array;
use log::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlCanvasElement, HtmlElement, HtmlInputElement};

use nesbridge_core::bridge::Bridge;
use nesbridge_core::config::Config;
use nesbridge_core::run_loop::RunState;

use crate::emulator::JsEmulationCore;
use crate::input::{KeySink, KeyboardInput};
use crate::js_error::{describe, to_js_error};
use crate::listener::EventListener;
use crate::rom_source::extract_rom;
use crate::scheduler::AnimationFrameScheduler;
use crate::screenshot::encode_png;
use crate::video::CanvasTarget;

type WebBridge = Bridge<JsEmulationCore, AnimationFrameScheduler, CanvasTarget>;

struct Host {
    bridge: WebBridge,
    toggle_button: Option<HtmlElement>,
}

impl Host {
    fn load(&mut self, bytes: &[u8]) -> Result<(), String> {
        let result = match extract_rom(bytes) {
            Ok(rom) => self.bridge.load_rom(&rom).map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };
        self.sync_controls();
        result
    }

    fn on_frame(&mut self) {
        if self.bridge.on_frame().is_err() {
            self.sync_controls();
        }
    }

    fn toggle(&mut self) -> Result<RunState, String> {
        let result = self.bridge.toggle().map_err(|err| err.to_string());
        self.sync_controls();
        result
    }

    /// Label the toggle button with the action it will perform.
    fn sync_controls(&self) {
        if let Some(button) = &self.toggle_button {
            let label = match self.bridge.run_state() {
                RunState::Running => "Pause",
                RunState::Stopped => "Play",
            };
            button.set_text_content(Some(label));
        }
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        // a callback firing after the closure is freed throws in JS
        self.bridge.pause();
    }
}

impl KeySink for Host {
    fn key_down(&mut self, code: &str, repeat: bool) -> bool {
        if !self.bridge.handles_key(code) {
            return false;
        }
        if let Err(err) = self.bridge.key_down(code, repeat) {
            error!("{code}: {err}");
        }
        self.sync_controls();
        true
    }

    fn key_up(&mut self, code: &str) -> bool {
        if !self.bridge.handles_key(code) {
            return false;
        }
        self.bridge.key_up(code);
        true
    }
}

/// Browser frontend: one canvas, the keyboard, and optional page controls.
#[wasm_bindgen]
pub struct WebFrontend {
    host: Rc<RefCell<Host>>,
    _keyboard: KeyboardInput,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl WebFrontend {
    /// Attach to the `<canvas>` with id `canvas_id`. `config_toml` overrides
    /// the default scale, overscan and key bindings.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_toml: Option<String>) -> Result<WebFrontend, JsValue> {
        let config = match config_toml.as_deref() {
            Some(text) => Config::from_toml_str(text).map_err(to_js_error)?,
            None => Config::default(),
        };

        let window = web_sys::window().ok_or_else(|| to_js_error("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| to_js_error("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| to_js_error(format!("no element #{canvas_id}")))?
            .dyn_into()
            .map_err(|_| to_js_error(format!("#{canvas_id} is not a canvas")))?;
        let target = CanvasTarget::new(&document, canvas)?;

        let raf_window = window.clone();
        let host = Rc::new_cyclic(move |weak: &Weak<RefCell<Host>>| {
            let weak = weak.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
                if let Some(host) = weak.upgrade() {
                    host.borrow_mut().on_frame();
                }
            });
            let scheduler = AnimationFrameScheduler::new(raf_window, callback);
            RefCell::new(Host {
                bridge: Bridge::new(JsEmulationCore::new(), scheduler, target, &config),
                toggle_button: None,
            })
        });

        let keyboard = KeyboardInput::attach(&window, Rc::downgrade(&host))?;
        info!("frontend attached to #{canvas_id}");
        Ok(Self {
            host,
            _keyboard: keyboard,
            listeners: Vec::new(),
        })
    }

    /// Load a ROM image (raw iNES or zipped) and start running it.
    pub fn load_rom(&self, bytes: &[u8]) -> Result<(), JsValue> {
        self.host.borrow_mut().load(bytes).map_err(to_js_error)
    }

    pub fn play(&self) -> Result<(), JsValue> {
        let mut host = self.host.borrow_mut();
        let result = host.bridge.play().map_err(to_js_error);
        host.sync_controls();
        result
    }

    pub fn pause(&self) {
        let mut host = self.host.borrow_mut();
        host.bridge.pause();
        host.sync_controls();
    }

    /// Flip play/pause; returns whether the loop is now running.
    pub fn toggle(&self) -> Result<bool, JsValue> {
        let state = self.host.borrow_mut().toggle().map_err(to_js_error)?;
        Ok(state == RunState::Running)
    }

    /// Advance exactly one frame while paused.
    pub fn step(&self) -> Result<(), JsValue> {
        let mut host = self.host.borrow_mut();
        let result = host.bridge.step().map_err(to_js_error);
        host.sync_controls();
        result
    }

    #[wasm_bindgen(getter)]
    pub fn is_running(&self) -> bool {
        self.host.borrow().bridge.run_state() == RunState::Running
    }

    #[wasm_bindgen(getter)]
    pub fn frames_presented(&self) -> u64 {
        self.host.borrow().bridge.frames_presented()
    }

    /// Why the loop halted, if a fatal error stopped it.
    #[wasm_bindgen(getter)]
    pub fn fault(&self) -> Option<String> {
        self.host.borrow().bridge.fault().map(str::to_owned)
    }

    /// PNG of the last decoded frame at native resolution.
    pub fn screenshot_png(&self) -> Result<Vec<u8>, JsValue> {
        encode_png(self.host.borrow().bridge.display().surface()).map_err(to_js_error)
    }

    /// Make the element with id `id` a play/pause button.
    pub fn bind_toggle_button(&mut self, id: &str) -> Result<(), JsValue> {
        let button: HtmlElement = element_by_id(id)?;
        let weak = Rc::downgrade(&self.host);
        let listener = EventListener::new(&button, "click", move |_event| {
            if let Some(host) = weak.upgrade() {
                if let Err(err) = host.borrow_mut().toggle() {
                    error!("toggle: {err}");
                }
            }
        })?;

        let mut host = self.host.borrow_mut();
        host.toggle_button = Some(button);
        host.sync_controls();
        self.listeners.push(listener);
        Ok(())
    }

    /// Load whatever file gets picked in the `<input type="file">` with id `id`.
    pub fn bind_file_input(&mut self, id: &str) -> Result<(), JsValue> {
        let input: HtmlInputElement = element_by_id(id)?;
        let weak = Rc::downgrade(&self.host);
        let source = input.clone();
        let listener = EventListener::new(&input, "change", move |_event| {
            let Some(file) = source.files().and_then(|files| files.get(0)) else {
                return;
            };
            let name = file.name();
            let pending = JsFuture::from(file.array_buffer());
            let weak = weak.clone();
            spawn_local(async move {
                let buffer = match pending.await {
                    Ok(buffer) => buffer,
                    Err(err) => {
                        error!("reading {name} failed: {}", describe(&err));
                        return;
                    }
                };
                let bytes = Uint8Array::new(&buffer).to_vec();
                let Some(host) = weak.upgrade() else {
                    return;
                };
                if let Err(err) = host.borrow_mut().load(&bytes) {
                    error!("loading {name} failed: {err}");
                }
            });
        })?;
        self.listeners.push(listener);
        Ok(())
    }
}

fn element_by_id<T: JsCast>(id: &str) -> Result<T, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .ok_or_else(|| to_js_error(format!("no element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| to_js_error(format!("#{id} has the wrong element type")))
}
