/// Save Tabs - WebExtension to save open tabs into named tab groups and reopen them
/// Built with Rust + WASM + Yew

pub mod browser;
pub mod commands;
pub mod engine;
pub mod error;
pub mod host;
pub mod keys;
pub mod migration;
pub mod operations;
pub mod options;
pub mod saveable;
pub mod settings;
pub mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsApp>::new().render();
}
