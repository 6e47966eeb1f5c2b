pub mod branches;
pub mod details;
pub mod list;
pub mod password;

use gloo_timers::future::TimeoutFuture;

/// Delay before the page reloads after a user was added, edited or deleted
pub const RELOAD_DELAY_MS: u32 = 1500;

/// The user table comes from the server-rendered page, so mutations reload it
pub fn reload_page_later() {
    wasm_bindgen_futures::spawn_local(async {
        TimeoutFuture::new(RELOAD_DELAY_MS).await;
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    });
}

/// Native confirm dialog; false when there is no window
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
