use std::collections::HashMap;

use log::trace;

use crate::core::{ButtonId, Session};

/// Maps host key codes (`KeyboardEvent.code` in browsers) to emulator buttons.
#[derive(Clone, Debug, Default)]
pub struct KeyMap {
    map: HashMap<String, ButtonId>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a key code to a button. Rebinding a code replaces the old button.
    pub fn bind(&mut self, code: impl Into<String>, button: ButtonId) {
        self.map.insert(code.into(), button);
    }

    /// Look up the button for a key code.
    pub fn get(&self, code: &str) -> Option<ButtonId> {
        self.map.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Emulator controls that act on the run loop rather than the controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    StepFrame,
}

/// Forwards key edges to the session's button state.
///
/// Holds no button state of its own. Every press (including host
/// auto-repeat) and every release is forwarded; the core owns the result.
#[derive(Clone, Debug, Default)]
pub struct InputBridge {
    buttons: KeyMap,
    controls: HashMap<String, Command>,
}

impl InputBridge {
    pub fn new(buttons: KeyMap) -> Self {
        Self {
            buttons,
            controls: HashMap::new(),
        }
    }

    pub fn bind_control(&mut self, code: impl Into<String>, command: Command) {
        self.controls.insert(code.into(), command);
    }

    pub fn buttons(&self) -> &KeyMap {
        &self.buttons
    }

    /// True if the key does anything at all.
    pub fn is_bound(&self, code: &str) -> bool {
        self.controls.contains_key(code) || self.buttons.get(code).is_some()
    }

    /// Handle a key-down. Returns the control command bound to the key, if
    /// any; commands are not forwarded to the session.
    pub fn key_down<S: Session + ?Sized>(
        &self,
        code: &str,
        session: Option<&mut S>,
    ) -> Option<Command> {
        if let Some(&command) = self.controls.get(code) {
            return Some(command);
        }
        self.forward(code, true, session);
        None
    }

    /// Handle a key-up. Released edges are forwarded even for buttons that
    /// were never seen pressed.
    pub fn key_up<S: Session + ?Sized>(&self, code: &str, session: Option<&mut S>) {
        if self.controls.contains_key(code) {
            return;
        }
        self.forward(code, false, session);
    }

    fn forward<S: Session + ?Sized>(&self, code: &str, pressed: bool, session: Option<&mut S>) {
        let Some(button) = self.buttons.get(code) else {
            return;
        };
        match session {
            Some(session) => session.set_button(button, pressed),
            None => trace!("dropping {button} edge: no session loaded"),
        }
    }
}
