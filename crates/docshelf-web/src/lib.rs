//! Browser host for the Docshelf viewer.
//!
//! Compiled to WebAssembly, the crate reads the sidebar markup and the
//! embedded configuration (`<script id="docshelf-config" type="application/toml">`),
//! implements the viewer ports over `web-sys`, and forwards DOM events to
//! [`docshelf_viewer::App`]. The viewer starts on its own when the module is
//! instantiated; a few functions are exported for page scripts.
//!
//! The DOM-free parts (configuration fallback, action buttons, repaint
//! planning) build on every target so they can be tested natively.

#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod action;
mod config;
mod paint;
mod ready;
mod selectors;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod ports;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    host::boot();
}

/// Replace the content area with the loading indicator.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading() {
    host::with_host(|host| host.app().show_loading());
}

/// Navigate to a content path; the route loads on the following `hashchange`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = navigateTo)]
pub fn navigate_to(path: &str) {
    host::with_host(|host| host.app().router().navigate_to(path));
}

/// Drop every cached page.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = clearCache)]
pub fn clear_cache() {
    host::with_host(|host| host.app().router().clear_cache());
}

/// Expand every sidebar section without touching the stored state.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = expandAllSections)]
pub fn expand_all_sections() {
    host::with_host(|host| {
        host.app().navigation().expand_all_sections();
        host.paint();
    });
}

/// Collapse every sidebar section without touching the stored state.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = collapseAllSections)]
pub fn collapse_all_sections() {
    host::with_host(|host| {
        host.app().navigation().collapse_all_sections();
        host.paint();
    });
}
