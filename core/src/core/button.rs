use std::fmt;

/// One button on a standard controller.
///
/// The discriminant is the bit the button occupies in the controller shift
/// register, which is also the identifier the emulation core expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    A = 0b0000_0001,
    B = 0b0000_0010,
    Select = 0b0000_0100,
    Start = 0b0000_1000,
    Up = 0b0001_0000,
    Down = 0b0010_0000,
    Left = 0b0100_0000,
    Right = 0b1000_0000,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    pub fn mask(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::A => "A",
            Button::B => "B",
            Button::Select => "Select",
            Button::Start => "Start",
            Button::Up => "Up",
            Button::Down => "Down",
            Button::Left => "Left",
            Button::Right => "Right",
        }
    }
}

/// Controller port a button belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    One,
    Two,
}

impl Port {
    pub fn index(self) -> u8 {
        match self {
            Port::One => 0,
            Port::Two => 1,
        }
    }
}

/// Emulator-side button identifier: which controller, which button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ButtonId {
    pub port: Port,
    pub button: Button,
}

impl ButtonId {
    pub const fn new(port: Port, button: Button) -> Self {
        Self { port, button }
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{} {}", self.port.index() + 1, self.button.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_are_distinct_bits() {
        let combined = Button::ALL.iter().fold(0u8, |acc, b| {
            assert_eq!(acc & b.mask(), 0);
            acc | b.mask()
        });
        assert_eq!(combined, 0xFF);
    }

    #[test]
    fn test_display_names_port() {
        assert_eq!(ButtonId::new(Port::Two, Button::Start).to_string(), "P2 Start");
    }
}
