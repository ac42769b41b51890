//! RGB24 → RGBA expansion of pulled frames.

use crate::core::FrameRef;
use crate::core::emulator::FRAME_BYTES_PER_PIXEL;
use crate::display::surface::{RGBA_BYTES_PER_PIXEL, RasterSurface};
use crate::error::ContractViolation;

/// Expand a packed RGB24 frame into `surface`, forcing alpha to 0xFF.
///
/// The frame must hold exactly one RGB triple per surface pixel. Anything
/// else means the emulation core and the bridge disagree on the screen
/// format, so the surface is left untouched and a [`ContractViolation`] is
/// returned. A single pass over the source, no allocation.
pub fn decode_rgb24(
    frame: FrameRef<'_>,
    surface: &mut RasterSurface,
) -> Result<(), ContractViolation> {
    let expected = surface.pixel_count() * FRAME_BYTES_PER_PIXEL;
    let src = frame.as_bytes();
    if src.len() != expected {
        return Err(ContractViolation::FrameLength {
            expected,
            actual: src.len(),
        });
    }

    let dst = surface.as_bytes_mut();
    for (rgba, rgb) in dst
        .chunks_exact_mut(RGBA_BYTES_PER_PIXEL)
        .zip(src.chunks_exact(FRAME_BYTES_PER_PIXEL))
    {
        rgba[0] = rgb[0];
        rgba[1] = rgb[1];
        rgba[2] = rgb[2];
        rgba[3] = 0xFF;
    }
    Ok(())
}
