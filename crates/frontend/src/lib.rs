pub mod app;
pub mod domain;
pub mod layout;
pub mod pwa;
pub mod routes;
pub mod shared;
pub mod system;
pub mod usecases;

use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(debug_assertions)]
const LOG_LEVEL: log::Level = log::Level::Debug;
#[cfg(not(debug_assertions))]
const LOG_LEVEL: log::Level = log::Level::Info;

#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(LOG_LEVEL);
    console_error_panic_hook::set_once();

    log::info!("POP materials client v{}", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(app::App);
}
