#[allow(clippy::unit_arg, clippy::unused_unit)]
mod app;
mod contact;
mod dom;
mod logging;
mod motion;
mod nav;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
///
/// Installs the panic hook and console logging, then mounts the portfolio
/// page to the document body.
#[wasm_bindgen(start)]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount::mount_to_body(app::App);
}
