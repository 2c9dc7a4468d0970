//! Browser console logging.
//!
//! Thin wrappers over `console.info`/`warn`/`error` so call sites read
//! like ordinary log statements. Messages are prefixed with `[redact]`
//! to make them easy to filter in devtools.

use wasm_bindgen::JsValue;

fn tagged(message: &str) -> JsValue {
    JsValue::from_str(&format!("[redact] {message}"))
}

/// Log an informational message.
pub fn info(message: &str) {
    web_sys::console::info_1(&tagged(message));
}

/// Log a recoverable problem.
pub fn warn(message: &str) {
    web_sys::console::warn_1(&tagged(message));
}

/// Log a failure the user was told about.
pub fn error(message: &str) {
    web_sys::console::error_1(&tagged(message));
}
