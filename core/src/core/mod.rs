pub mod button;
pub mod emulator;
pub mod frame;

pub use button::{Button, ButtonId, Port};
pub use emulator::{EmulationCore, FRAME_LEN, SCREEN_HEIGHT, SCREEN_WIDTH, Session};
pub use frame::FrameRef;
