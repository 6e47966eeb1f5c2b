use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay plus positioned surface shared by the admin dialogs and the
/// model guide popup. Content brings its own header and buttons.
#[component]
pub fn ModalFrame(
    /// Called when the modal should close (overlay click, Escape, host)
    on_close: Callback<()>,
    /// Close when clicking on the overlay (default: true)
    #[prop(optional)]
    close_on_overlay: Option<bool>,
    /// Close on the Escape key (default: true)
    #[prop(optional)]
    close_on_escape: Option<bool>,
    /// Extra class for the modal surface (`div.modal`)
    #[prop(optional, into)]
    modal_class: Option<String>,
    /// Extra class for the overlay (`div.modal-overlay`)
    #[prop(optional, into)]
    overlay_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let close_on_overlay = close_on_overlay.unwrap_or(true);
    let overlay_mouse_down = RwSignal::new(false);

    // Deferred to the next tick: the overlay may be unmounted by its own handler
    let close_later = move || {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    if close_on_escape.unwrap_or(true) {
        let handle = window_event_listener(ev::keydown, move |ev| {
            if ev.key() == "Escape" {
                close_later();
            }
        });
        on_cleanup(move || handle.remove());
    }

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Both press and release must land on the overlay, so a text selection
    // that ends outside the dialog does not close it.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close =
            close_on_overlay && overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            close_later();
        }
    };

    let overlay_class = match overlay_class {
        Some(cls) => format!("modal-overlay {cls}"),
        None => "modal-overlay".to_string(),
    };
    let modal_class = match modal_class {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class=overlay_class
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=modal_class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                {children()}
            </div>
        </div>
    }
}
