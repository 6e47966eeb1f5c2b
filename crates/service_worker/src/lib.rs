//! Offline shell worker, built with `wasm-bindgen --target no-modules` and
//! served as `/static/sw.js`

mod cache;
mod handlers;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::ServiceWorkerGlobalScope;

#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    match js_sys::global().dyn_into::<ServiceWorkerGlobalScope>() {
        Ok(scope) => {
            if let Err(e) = handlers::listen(&scope) {
                log::error!("Service worker: failed to attach listeners: {:?}", e);
            }
        }
        Err(_) => log::error!("Service worker: not running in a service worker scope"),
    }
}
