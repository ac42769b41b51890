use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, KeyboardEvent};

use crate::listener::EventListener;

/// Receiver for host keyboard edges, keyed by `KeyboardEvent.code`.
///
/// Both methods return true when the key is bound, in which case the
/// browser's default action for it is suppressed.
pub trait KeySink {
    fn key_down(&mut self, code: &str, repeat: bool) -> bool;
    fn key_up(&mut self, code: &str) -> bool;
}

/// `keydown`/`keyup` listeners feeding a [`KeySink`].
pub struct KeyboardInput {
    _down: EventListener,
    _up: EventListener,
}

impl KeyboardInput {
    /// The sink is held weakly; events arriving after it is gone are ignored.
    pub fn attach<K>(target: &EventTarget, sink: Weak<RefCell<K>>) -> Result<Self, JsValue>
    where
        K: KeySink + 'static,
    {
        let down_sink = sink.clone();
        let down = EventListener::new(target, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(sink) = down_sink.upgrade() else {
                return;
            };
            let handled = sink.borrow_mut().key_down(&event.code(), event.repeat());
            if handled {
                event.prevent_default();
            }
        })?;

        let up = EventListener::new(target, "keyup", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(sink) = sink.upgrade() else {
                return;
            };
            let handled = sink.borrow_mut().key_up(&event.code());
            if handled {
                event.prevent_default();
            }
        })?;

        Ok(Self {
            _down: down,
            _up: up,
        })
    }
}
