//! PneumoScan Web Dashboard (Leptos + WASM)

mod app;
mod components;
mod api;
mod logger;

use wasm_bindgen::prelude::*;

pub use api::gemini::{browser_classifier, BrowserClassifier, FetchTransport, TimerDelay};

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    leptos::mount::mount_to_body(app::App);
}
