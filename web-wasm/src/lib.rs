//! GeoDais Dashboard (Leptos + WASM)

mod app;
mod components;
mod api;
mod map;
mod js_error;
mod logger;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    leptos::mount::mount_to_body(app::App);
}
