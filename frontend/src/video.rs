use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

use nesbridge_core::core::{SCREEN_HEIGHT, SCREEN_WIDTH};
use nesbridge_core::display::{Canvas, RasterSurface, SourceRect};
use nesbridge_core::error::{Error, Result as CoreResult};

use crate::js_error::describe;

/// A page `<canvas>` plus a detached native-resolution canvas.
///
/// Frames are written to the detached canvas with `putImageData`, then drawn
/// onto the visible one with smoothing disabled so pixels stay square.
pub struct CanvasTarget {
    visible: HtmlCanvasElement,
    visible_ctx: CanvasRenderingContext2d,
    offscreen: HtmlCanvasElement,
    offscreen_ctx: CanvasRenderingContext2d,
}

impl CanvasTarget {
    pub fn new(document: &Document, visible: HtmlCanvasElement) -> Result<Self, JsValue> {
        let visible_ctx = context_2d(&visible)?;
        let offscreen: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        offscreen.set_width(SCREEN_WIDTH);
        offscreen.set_height(SCREEN_HEIGHT);
        let offscreen_ctx = context_2d(&offscreen)?;
        Ok(Self {
            visible,
            visible_ctx,
            offscreen,
            offscreen_ctx,
        })
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

fn present_error(err: JsValue) -> Error {
    Error::Present(describe(&err))
}

impl Canvas for CanvasTarget {
    fn resize(&mut self, width: u32, height: u32) {
        self.visible.set_width(width);
        self.visible.set_height(height);
        // resizing resets the context state
        self.visible_ctx.set_image_smoothing_enabled(false);
    }

    fn put_native(&mut self, surface: &RasterSurface) -> CoreResult<()> {
        if self.offscreen.width() != surface.width() || self.offscreen.height() != surface.height()
        {
            self.offscreen.set_width(surface.width());
            self.offscreen.set_height(surface.height());
        }
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(surface.as_bytes()),
            surface.width(),
            surface.height(),
        )
        .map_err(present_error)?;
        self.offscreen_ctx
            .put_image_data(&image, 0.0, 0.0)
            .map_err(present_error)
    }

    fn blit_scaled(&mut self, source: SourceRect, scale: u32) -> CoreResult<()> {
        let (sw, sh) = (f64::from(source.width), f64::from(source.height));
        let scale = f64::from(scale);
        self.visible_ctx
            .draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &self.offscreen,
                f64::from(source.x),
                f64::from(source.y),
                sw,
                sh,
                0.0,
                0.0,
                sw * scale,
                sh * scale,
            )
            .map_err(present_error)
    }
}
