//! User-tunable settings: scale, overscan, key bindings.
//!
//! Loaded from TOML. Every section is optional; a missing section keeps its
//! default. Key codes are `KeyboardEvent.code` strings ("KeyA", "ArrowUp").

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Button, ButtonId, Port, SCREEN_HEIGHT};
use crate::display::Overscan;
use crate::error::ConfigError;
use crate::input::{Command, InputBridge, KeyMap};

/// One key code per controller button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonLayout {
    pub left: String,
    pub up: String,
    pub down: String,
    pub right: String,
    pub a: String,
    pub b: String,
    pub start: String,
    pub select: String,
}

impl ButtonLayout {
    pub fn player_one() -> Self {
        Self {
            left: "KeyA".into(),
            up: "KeyW".into(),
            down: "KeyS".into(),
            right: "KeyD".into(),
            a: "KeyF".into(),
            b: "KeyG".into(),
            start: "KeyT".into(),
            select: "KeyY".into(),
        }
    }

    pub fn player_two() -> Self {
        Self {
            left: "ArrowLeft".into(),
            up: "ArrowUp".into(),
            down: "ArrowDown".into(),
            right: "ArrowRight".into(),
            a: "ShiftRight".into(),
            b: "Enter".into(),
            start: "KeyB".into(),
            select: "KeyN".into(),
        }
    }

    fn bindings(&self) -> [(&str, Button); 8] {
        [
            (&self.left, Button::Left),
            (&self.up, Button::Up),
            (&self.down, Button::Down),
            (&self.right, Button::Right),
            (&self.a, Button::A),
            (&self.b, Button::B),
            (&self.start, Button::Start),
            (&self.select, Button::Select),
        ]
    }
}

/// Keys for the emulator controls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLayout {
    pub pause: String,
    pub step: String,
}

impl Default for ControlLayout {
    fn default() -> Self {
        Self {
            pause: "KeyP".into(),
            step: "Period".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Integer magnification of the native screen.
    pub scale: u32,
    pub overscan: Overscan,
    pub controller1: ButtonLayout,
    pub controller2: ButtonLayout,
    pub controls: ControlLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: 2,
            overscan: Overscan::default(),
            controller1: ButtonLayout::player_one(),
            controller2: ButtonLayout::player_two(),
            controls: ControlLayout::default(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        debug!("loaded config: {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale == 0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        let hidden = self.overscan.top.checked_add(self.overscan.bottom);
        if hidden.is_none_or(|rows| rows >= SCREEN_HEIGHT) {
            return Err(ConfigError::InvalidOverscan {
                top: self.overscan.top,
                bottom: self.overscan.bottom,
                height: SCREEN_HEIGHT,
            });
        }

        let mut seen: HashMap<&str, String> = HashMap::new();
        for (code, label) in self.all_bindings() {
            if code.trim().is_empty() {
                return Err(ConfigError::UnknownKey(label));
            }
            if let Some(first) = seen.get(code) {
                return Err(ConfigError::DuplicateKey {
                    key: code.to_string(),
                    first: first.clone(),
                    second: label,
                });
            }
            seen.insert(code, label);
        }
        Ok(())
    }

    /// Build the input bridge for these bindings.
    pub fn input_bridge(&self) -> InputBridge {
        let mut keys = KeyMap::new();
        for (layout, port) in [(&self.controller1, Port::One), (&self.controller2, Port::Two)] {
            for (code, button) in layout.bindings() {
                keys.bind(code, ButtonId::new(port, button));
            }
        }
        let mut bridge = InputBridge::new(keys);
        bridge.bind_control(self.controls.pause.clone(), Command::TogglePause);
        bridge.bind_control(self.controls.step.clone(), Command::StepFrame);
        bridge
    }

    fn all_bindings(&self) -> Vec<(&str, String)> {
        let mut out = Vec::with_capacity(18);
        for (layout, port) in [(&self.controller1, Port::One), (&self.controller2, Port::Two)] {
            for (code, button) in layout.bindings() {
                out.push((code, ButtonId::new(port, button).to_string()));
            }
        }
        out.push((self.controls.pause.as_str(), "pause".to_string()));
        out.push((self.controls.step.as_str(), "step".to_string()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        let bridge = config.input_bridge();
        assert_eq!(bridge.buttons().len(), 16);
        assert_eq!(
            bridge.buttons().get("ArrowUp"),
            Some(ButtonId::new(Port::Two, Button::Up))
        );
        assert_eq!(
            bridge.buttons().get("KeyF"),
            Some(ButtonId::new(Port::One, Button::A))
        );
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_document() {
        let config = Config::from_toml_str(
            r#"
            scale = 3

            [overscan]
            top = 8
            bottom = 8

            [controls]
            pause = "Space"
            "#,
        )
        .unwrap();
        assert_eq!(config.scale, 3);
        assert_eq!(config.overscan, Overscan { top: 8, bottom: 8 });
        assert_eq!(config.controls.pause, "Space");
        assert_eq!(config.controls.step, "Period");
        assert_eq!(config.controller1, ButtonLayout::player_one());
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert!(matches!(
            Config::from_toml_str("scale = 0"),
            Err(ConfigError::InvalidScale(0))
        ));
    }

    #[test]
    fn test_overscan_cannot_hide_whole_screen() {
        let err = Config::from_toml_str("[overscan]\ntop = 120\nbottom = 120").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverscan { .. }));
    }

    #[test]
    fn test_overscan_overflow_rejected() {
        let err = Config::from_toml_str("[overscan]\ntop = 4294967295\nbottom = 1").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverscan {
                top: u32::MAX,
                bottom: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = Config::from_toml_str("[controls]\npause = \"KeyF\"").unwrap_err();
        match err {
            ConfigError::DuplicateKey { key, first, second } => {
                assert_eq!(key, "KeyF");
                assert_eq!(first, "P1 A");
                assert_eq!(second, "pause");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = Config::from_toml_str("[controls]\nstep = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(label) if label == "step"));
    }

    #[test]
    fn test_incomplete_layout_is_parse_error() {
        let err = Config::from_toml_str("[controller1]\nleft = \"KeyJ\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Config::from_toml_str("scale = "),
            Err(ConfigError::Parse(_))
        ));
    }
}
