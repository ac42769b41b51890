//! Browser frontend for the NES bridge.
//!
//! ROM extraction and screenshots build everywhere; the DOM host only on
//! `wasm32`.

pub mod rom_source;
pub mod screenshot;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod emulator;
#[cfg(target_arch = "wasm32")]
mod input;
#[cfg(target_arch = "wasm32")]
mod js_error;
#[cfg(target_arch = "wasm32")]
mod listener;
#[cfg(target_arch = "wasm32")]
mod logger;
#[cfg(target_arch = "wasm32")]
pub mod scheduler;
#[cfg(target_arch = "wasm32")]
pub mod video;

#[cfg(target_arch = "wasm32")]
pub use app::WebFrontend;

#[cfg(target_arch = "wasm32")]
mod entry {
    use log::LevelFilter;
    use wasm_bindgen::prelude::*;

    use crate::logger;

    #[wasm_bindgen(start)]
    pub fn start() {
        logger::install_panic_hook();
        logger::init(LevelFilter::Info);
    }

    /// Change console verbosity: "error", "warn", "info", "debug", "trace"
    /// or "off".
    #[wasm_bindgen]
    pub fn set_log_level(level: &str) -> Result<(), JsValue> {
        let level: LevelFilter = level
            .parse()
            .map_err(|_| crate::js_error::to_js_error(format!("unknown log level {level:?}")))?;
        logger::init(level);
        Ok(())
    }
}
