//! # activity-board
//!
//! Leptos + WASM client for the extracurricular activity signup service.
//! Lists activities with their rosters, signs students up through a form,
//! and removes participants from a per-row delete button, re-fetching the
//! whole board after every change.
//!
//! Build with `--features csr` for the browser. Without it the crate builds
//! natively and the controller can be exercised against an in-memory backend.

pub mod app;
pub mod board_sync;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entry point: install console hooks and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger unavailable: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
