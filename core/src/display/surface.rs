use crate::core::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Bytes per pixel on the raster surface (R, G, B, A).
pub const RGBA_BYTES_PER_PIXEL: usize = 4;

/// Native-resolution RGBA pixel grid, rewritten in full once per frame.
///
/// Alpha is always 0xFF: the display has no notion of transparency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Create an opaque black surface.
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * RGBA_BYTES_PER_PIXEL];
        for px in pixels.chunks_exact_mut(RGBA_BYTES_PER_PIXEL) {
            px[3] = 0xFF;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Surface sized for the emulated screen.
    pub fn screen() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Pixel at (x, y) as [R, G, B, A].
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * RGBA_BYTES_PER_PIXEL;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.pixels[offset..offset + RGBA_BYTES_PER_PIXEL]);
        out
    }

    /// One row of RGBA bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * RGBA_BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::screen()
    }
}
