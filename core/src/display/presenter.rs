use serde::{Deserialize, Serialize};

use crate::display::surface::RasterSurface;
use crate::error::Result;

/// Rows hidden at the top and bottom of the screen when presenting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overscan {
    pub top: u32,
    pub bottom: u32,
}

/// Region of the off-screen buffer that gets drawn to the visible canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Host drawing target with an off-screen buffer and a visible canvas.
pub trait Canvas {
    /// Resize the visible canvas.
    fn resize(&mut self, width: u32, height: u32);

    /// Write the surface to the off-screen buffer at native resolution.
    fn put_native(&mut self, surface: &RasterSurface) -> Result<()>;

    /// Draw `source` from the off-screen buffer onto the visible canvas,
    /// magnified by `scale` with nearest-neighbor sampling.
    fn blit_scaled(&mut self, source: SourceRect, scale: u32) -> Result<()>;
}

/// Owns the visible canvas and pushes decoded frames to it.
pub struct DisplayPresenter<C: Canvas> {
    canvas: C,
    scale: u32,
    source: SourceRect,
}

impl<C: Canvas> DisplayPresenter<C> {
    /// Size the canvas for `width` x `height` native pixels (minus overscan)
    /// at the given integer scale.
    pub fn new(mut canvas: C, width: u32, height: u32, scale: u32, overscan: Overscan) -> Self {
        let scale = scale.max(1);
        let top = overscan.top.min(height);
        let visible_height = height.saturating_sub(overscan.top.saturating_add(overscan.bottom));
        let source = SourceRect {
            x: 0,
            y: top,
            width,
            height: visible_height,
        };
        canvas.resize(width.saturating_mul(scale), visible_height.saturating_mul(scale));
        Self {
            canvas,
            scale,
            source,
        }
    }

    /// Both writes complete before returning, so the caller may reuse
    /// `surface` immediately.
    pub fn present(&mut self, surface: &RasterSurface) -> Result<()> {
        self.canvas.put_native(surface)?;
        self.canvas.blit_scaled(self.source, self.scale)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Visible canvas size in host pixels.
    pub fn output_size(&self) -> (u32, u32) {
        (
            self.source.width.saturating_mul(self.scale),
            self.source.height.saturating_mul(self.scale),
        )
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }
}
