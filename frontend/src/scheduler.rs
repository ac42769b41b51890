use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use nesbridge_core::error::{Error, Result};
use nesbridge_core::run_loop::Scheduler;

use crate::js_error::describe;

/// `requestAnimationFrame` as a one-shot scheduler.
///
/// Every request runs the same callback; the callback is expected to hold
/// only a weak handle back to whatever owns this scheduler.
pub struct AnimationFrameScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window, callback: Closure<dyn FnMut(f64)>) -> Self {
        Self { window, callback }
    }
}

impl Scheduler for AnimationFrameScheduler {
    type Token = i32;

    fn schedule(&mut self) -> Result<i32> {
        self.window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .map_err(|err| Error::Schedule(describe(&err)))
    }

    fn cancel(&mut self, token: i32) {
        if let Err(err) = self.window.cancel_animation_frame(token) {
            warn!("cancelAnimationFrame({token}) failed: {}", describe(&err));
        }
    }
}
