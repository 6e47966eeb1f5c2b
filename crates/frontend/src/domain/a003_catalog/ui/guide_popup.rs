use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, TouchEvent};

use crate::domain::a003_catalog::zoom::{distance, ZoomPan};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;

fn touch_point(ev: &TouchEvent, i: u32) -> Option<(f64, f64)> {
    ev.touches()
        .get(i)
        .map(|t| (f64::from(t.client_x()), f64::from(t.client_y())))
}

fn pinch_distance(ev: &TouchEvent) -> Option<f64> {
    let (ax, ay) = touch_point(ev, 0)?;
    let (bx, by) = touch_point(ev, 1)?;
    Some(distance(ax, ay, bx, by))
}

/// Cursor position relative to the center of the event's element
fn offset_from_center(ev: &ev::WheelEvent) -> (f64, f64) {
    let Some(el) = ev
        .current_target()
        .and_then(|t| t.dyn_into::<Element>().ok())
    else {
        return (0.0, 0.0);
    };
    let rect = el.get_bounding_client_rect();
    (
        f64::from(ev.client_x()) - rect.left() - rect.width() / 2.0,
        f64::from(ev.client_y()) - rect.top() - rect.height() / 2.0,
    )
}

/// Full-screen viewer for a model's display guide
#[component]
pub fn ModelGuidePopup(
    image_url: String,
    #[prop(into)] title: String,
    on_close: Callback<()>,
) -> impl IntoView {
    let zoom = RwSignal::new(ZoomPan::new());

    let on_wheel = move |ev: ev::WheelEvent| {
        ev.prevent_default();
        let (cx, cy) = offset_from_center(&ev);
        zoom.update(|z| z.wheel(ev.delta_y(), cx, cy));
    };

    let on_mouse_down = move |ev: ev::MouseEvent| {
        let started = zoom
            .try_update(|z| z.drag_start(f64::from(ev.client_x()), f64::from(ev.client_y()), true))
            .unwrap_or(false);
        if started {
            ev.prevent_default();
        }
    };

    let move_handle = window_event_listener(ev::mousemove, move |ev| {
        if zoom.with_untracked(|z| z.is_dragging()) {
            ev.prevent_default();
            zoom.update(|z| z.drag_move(f64::from(ev.client_x()), f64::from(ev.client_y())));
        }
    });
    let up_handle = window_event_listener(ev::mouseup, move |_| {
        if zoom.with_untracked(|z| z.is_dragging()) {
            zoom.update(|z| z.drag_end());
        }
    });
    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
    });

    let on_touch_start = move |ev: TouchEvent| {
        ev.prevent_default();
        match ev.touches().length() {
            2 => {
                if let Some(d) = pinch_distance(&ev) {
                    zoom.update(|z| z.pinch_start(d));
                }
            }
            1 => {
                if let Some((x, y)) = touch_point(&ev, 0) {
                    zoom.update(|z| {
                        z.drag_start(x, y, false);
                    });
                }
            }
            _ => {}
        }
    };

    let on_touch_move = move |ev: TouchEvent| {
        ev.prevent_default();
        match ev.touches().length() {
            2 => {
                if let Some(d) = pinch_distance(&ev) {
                    zoom.update(|z| z.pinch_move(d));
                }
            }
            1 => {
                if let Some((x, y)) = touch_point(&ev, 0) {
                    zoom.update(|z| z.drag_move(x, y));
                }
            }
            _ => {}
        }
    };

    let on_touch_end = move |ev: TouchEvent| {
        let remaining = ev.touches().length();
        zoom.update(|z| {
            if remaining < 2 {
                z.pinch_end();
            }
            if remaining == 0 {
                z.drag_end();
                z.tap(js_sys::Date::now());
            } else if let Some((x, y)) = touch_point(&ev, 0) {
                // one finger left after a pinch keeps panning from where it is
                z.drag_start(x, y, true);
            }
        });
    };

    let on_double_click = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        zoom.update(|z| z.toggle());
    };

    let alt = title.clone();

    view! {
        <ModalFrame on_close=on_close modal_class="guide-popup" overlay_class="guide-overlay">
            <div class="modal-header">
                <h3 class="modal-title">{title}</h3>
                <button class="button button--ghost" title="Close" on:click=move |_| on_close.run(())>
                    {icon("x")}
                </button>
            </div>
            <div class="guide-popup__viewport">
                <img
                    class="guide-popup__image"
                    src=image_url
                    alt=alt
                    draggable="false"
                    style:transform=move || zoom.with(|z| z.transform())
                    style:cursor=move || if zoom.with(|z| z.is_dragging()) { "grabbing" } else { "grab" }
                    on:wheel=on_wheel
                    on:mousedown=on_mouse_down
                    on:dblclick=on_double_click
                    on:touchstart=on_touch_start
                    on:touchmove=on_touch_move
                    on:touchend=on_touch_end
                />
            </div>
            <div class="modal-footer guide-popup__hint">
                "Scroll or pinch to zoom, drag to move, double-tap to reset"
            </div>
        </ModalFrame>
    }
}
