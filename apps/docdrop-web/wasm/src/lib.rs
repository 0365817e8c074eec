//! WASM bindings for the document intake widget
//!
//! Single-file intake for PDF/DOC/DOCX documents: click-to-browse or
//! drag-and-drop, type validation, metadata display, and a gated finish
//! action. All state is held in Rust, minimizing JavaScript complexity.
//!
//! ## Architecture
//!
//! - Selection state and validation in Rust via `docdrop-core`
//! - Event wiring and rendering in Rust via `IntakeWidget`
//! - JavaScript only supplies the host elements and loads the module
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { IntakeWidget } from './pkg/docdrop_wasm.js';
//!
//! await init();
//!
//! const widget = new IntakeWidget('uploadArea', 'fileInput', 'lastStepBtn', 'finishBtn');
//! // All event handling happens in Rust from here on. Hosts that wire
//! // their own events can drive the widget directly instead:
//! widget.offerFile('report.pdf', 1536, 'application/pdf');
//! widget.canFinish();      // true
//! widget.getSelectedFile(); // { name, size_bytes, size_display, mime_type, kind }
//! widget.finish();          // receipt record; raises the confirmation notice
//! ```

pub mod dom;
pub mod toast;
pub mod widget;

use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use widget::IntakeWidget;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"docdrop WASM initialized".into());
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check whether a file would pass the intake gate
/// without mounting a widget
#[wasm_bindgen(js_name = isAcceptableFile)]
pub fn is_acceptable_file(name: &str, mime_type: &str) -> bool {
    docdrop_core::is_acceptable_file(name, mime_type)
}

/// Format a byte count as a human-readable size
#[wasm_bindgen(js_name = formatSize)]
pub fn format_size(bytes: f64) -> String {
    docdrop_core::format_size(bytes as u64)
}
