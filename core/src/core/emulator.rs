use crate::core::button::ButtonId;
use crate::core::frame::FrameRef;
use crate::error::InvalidRom;

/// Native NES output resolution.
pub const SCREEN_WIDTH: u32 = 256;
pub const SCREEN_HEIGHT: u32 = 240;

/// Bytes per pixel in frames pulled from the emulation core (R, G, B).
pub const FRAME_BYTES_PER_PIXEL: usize = 3;

/// Exact length of every frame the emulation core hands out.
pub const FRAME_LEN: usize =
    SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize * FRAME_BYTES_PER_PIXEL;

/// Entry point into an opaque emulation core.
///
/// The bridge does not parse ROMs itself. Whether an image is acceptable is
/// entirely up to the core; a rejection leaves the bridge's state untouched.
pub trait EmulationCore {
    /// Instantiate a session from a raw ROM image.
    fn create_session(&self, rom: &[u8]) -> Result<Box<dyn Session>, InvalidRom>;
}

/// A running emulator instance created from one ROM.
///
/// Dropping the session releases the underlying handle.
pub trait Session {
    /// Emulate up to the end of the next frame and return a view of it.
    ///
    /// The returned view is packed RGB24 (see [`FRAME_LEN`]) and only valid
    /// until the session is touched again.
    fn pull_frame(&mut self) -> FrameRef<'_>;

    /// Latch a pressed/released edge for one button.
    ///
    /// Called per input event, not per frame. Repeated presses are forwarded
    /// as-is; the core decides how to treat them.
    fn set_button(&mut self, button: ButtonId, pressed: bool);
}
