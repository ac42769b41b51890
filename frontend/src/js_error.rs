use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Some(err) = err.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{err:?}")
}

/// Wrap a Rust error as a JS `Error` for returning across the boundary.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
