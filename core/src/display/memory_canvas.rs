use crate::display::presenter::{Canvas, SourceRect};
use crate::display::surface::{RGBA_BYTES_PER_PIXEL, RasterSurface};
use crate::error::{Error, Result};

/// Headless [`Canvas`] backed by plain RGBA buffers.
///
/// Scaling is done in software with whole-pixel blocks, matching what a
/// browser canvas does with image smoothing disabled.
pub struct MemoryCanvas {
    offscreen: RasterSurface,
    visible: Vec<u8>,
    width: u32,
    height: u32,
    native_writes: u64,
    blits: u64,
}

impl MemoryCanvas {
    pub fn new() -> Self {
        Self {
            offscreen: RasterSurface::new(0, 0),
            visible: Vec::new(),
            width: 0,
            height: 0,
            native_writes: 0,
            blits: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Visible canvas contents, RGBA row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.visible
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * RGBA_BYTES_PER_PIXEL;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.visible[offset..offset + RGBA_BYTES_PER_PIXEL]);
        out
    }

    /// Number of `put_native` calls seen.
    pub fn native_writes(&self) -> u64 {
        self.native_writes
    }

    /// Number of `blit_scaled` calls seen.
    pub fn blits(&self) -> u64 {
        self.blits
    }
}

impl Default for MemoryCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for MemoryCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.visible = vec![0u8; width as usize * height as usize * RGBA_BYTES_PER_PIXEL];
    }

    fn put_native(&mut self, surface: &RasterSurface) -> Result<()> {
        self.offscreen.clone_from(surface);
        self.native_writes += 1;
        Ok(())
    }

    fn blit_scaled(&mut self, source: SourceRect, scale: u32) -> Result<()> {
        let right = u64::from(source.x) + u64::from(source.width);
        let bottom = u64::from(source.y) + u64::from(source.height);
        if right > u64::from(self.offscreen.width()) || bottom > u64::from(self.offscreen.height()) {
            return Err(Error::Present(format!(
                "source {source:?} exceeds off-screen buffer {}x{}",
                self.offscreen.width(),
                self.offscreen.height()
            )));
        }

        let scale = scale as usize;
        let out_width = source.width as usize * scale;
        let out_height = source.height as usize * scale;
        let stride = self.width as usize * RGBA_BYTES_PER_PIXEL;
        let copy_width = out_width.min(self.width as usize) * RGBA_BYTES_PER_PIXEL;

        let mut scaled_row = vec![0u8; out_width * RGBA_BYTES_PER_PIXEL];
        for sy in 0..source.height as usize {
            let row = self.offscreen.row(source.y + sy as u32);
            let row = &row[source.x as usize * RGBA_BYTES_PER_PIXEL..];
            for (sx, px) in row
                .chunks_exact(RGBA_BYTES_PER_PIXEL)
                .take(source.width as usize)
                .enumerate()
            {
                for block in 0..scale {
                    let dst = (sx * scale + block) * RGBA_BYTES_PER_PIXEL;
                    scaled_row[dst..dst + RGBA_BYTES_PER_PIXEL].copy_from_slice(px);
                }
            }

            for repeat in 0..scale {
                let dy = sy * scale + repeat;
                if dy >= out_height || dy >= self.height as usize {
                    break;
                }
                let start = dy * stride;
                self.visible[start..start + copy_width]
                    .copy_from_slice(&scaled_row[..copy_width]);
            }
        }
        self.blits += 1;
        Ok(())
    }
}
