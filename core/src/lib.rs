pub mod bridge;
pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod input;
pub mod run_loop;

pub mod prelude {
    pub use crate::bridge::Bridge;
    pub use crate::config::Config;
    pub use crate::core::{Button, ButtonId, EmulationCore, FrameRef, Port, Session};
    pub use crate::display::{Canvas, MemoryCanvas, RasterSurface, SourceRect};
    pub use crate::error::{ContractViolation, Error, InvalidRom, Result};
    pub use crate::run_loop::{RunState, Scheduler};
}
