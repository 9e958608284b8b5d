//! # puceats-client
//!
//! Browser-side glue for the PUC Eats restaurant and dish pages.
//!
//! The core is the favorites store: a persistent set of restaurant IDs kept
//! in `localStorage` and mirrored onto every favorite control on the page.
//! Around it sit thin page helpers for modals, the dish form, and the dish
//! list filter.
//!
//! Pure logic compiles and tests natively. The `hydrate` feature binds it to
//! the real DOM through `web-sys` and exposes the wasm start hook.

#[cfg(feature = "hydrate")]
pub mod app;
pub mod components;
pub mod config;
#[cfg(feature = "hydrate")]
pub mod exports;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: install logging and the panic hook, then wire the page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
    app::boot();
}
