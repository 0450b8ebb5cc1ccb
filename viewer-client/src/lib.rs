//! Board Viewer - WASM page glue
//!
//! Exposes [`FrameViewer`] (live board frames over WebSocket) and
//! [`MenuNavigator`] (menu button redirects) to the page.

use wasm_bindgen::prelude::*;

pub mod dom;
mod frame_viewer;
mod navigator;

pub use frame_viewer::FrameViewer;
pub use navigator::MenuNavigator;

/// Panic hook and console logger. Safe to call from every constructor; the
/// logger is only installed the first time.
pub(crate) fn init_runtime() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_ok() {
        log::debug!("console logger installed");
    }
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}
