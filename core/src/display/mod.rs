pub mod decoder;
pub mod memory_canvas;
pub mod presenter;
pub mod surface;

pub use decoder::decode_rgb24;
pub use memory_canvas::MemoryCanvas;
pub use presenter::{Canvas, DisplayPresenter, Overscan, SourceRect};
pub use surface::RasterSurface;

use crate::core::FrameRef;
use crate::error::Result;

/// Decode → present pipeline driven once per tick.
pub struct Display<C: Canvas> {
    surface: RasterSurface,
    presenter: DisplayPresenter<C>,
    frames_presented: u64,
}

impl<C: Canvas> Display<C> {
    pub fn new(canvas: C, scale: u32, overscan: Overscan) -> Self {
        let surface = RasterSurface::screen();
        let presenter =
            DisplayPresenter::new(canvas, surface.width(), surface.height(), scale, overscan);
        Self {
            surface,
            presenter,
            frames_presented: 0,
        }
    }

    /// Consume one pulled frame: decode it into the surface and draw it.
    ///
    /// Finishes with the frame before returning, so the borrow on the
    /// session ends here.
    pub fn show(&mut self, frame: FrameRef<'_>) -> Result<()> {
        decode_rgb24(frame, &mut self.surface)?;
        self.presenter.present(&self.surface)?;
        self.frames_presented += 1;
        Ok(())
    }

    /// Last decoded frame at native resolution.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn presenter(&self) -> &DisplayPresenter<C> {
        &self.presenter
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}
