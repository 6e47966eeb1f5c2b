use leptos::prelude::*;

use super::queue::ToastPhase;
use super::service::use_toasts;

/// Fixed container rendering every toast of the page's queue
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();
    let queue = toasts.queue();

    view! {
        <div id="toast-container" class="toast-container">
            <For
                each=move || queue.with(|q| q.all().iter().map(|t| t.id.clone()).collect::<Vec<_>>())
                key=|id| id.clone()
                children=move |id| {
                    let id_class = id.clone();
                    let id_icon = id.clone();
                    let id_title = id.clone();
                    let id_body = id.clone();
                    let id_close = id.clone();
                    let id_closable = id.clone();

                    let class = move || {
                        queue.with(|q| match q.get(&id_class) {
                            Some(t) => {
                                let phase = match t.phase {
                                    ToastPhase::Visible => "show",
                                    ToastPhase::Leaving { .. } => "hide",
                                };
                                format!("toast {} {}", t.kind.css_class(), phase)
                            }
                            None => "toast hide".to_string(),
                        })
                    };
                    let icon = move || queue.with(|q| q.get(&id_icon).map(|t| t.kind.icon()).unwrap_or_default());
                    let title = move || queue.with(|q| q.get(&id_title).map(|t| t.title.clone()).unwrap_or_default());
                    let body = move || queue.with(|q| q.get(&id_body).map(|t| t.body.clone()).unwrap_or_default());
                    let closable = move || queue.with(|q| q.get(&id_closable).is_some_and(|t| t.closable));

                    view! {
                        <div class=class role="status">
                            <div class="toast-header">
                                <div class="toast-icon">{icon}</div>
                                <div class="toast-title">{title}</div>
                                <Show when=closable>
                                    {
                                        let id_close = id_close.clone();
                                        view! {
                                            <button
                                                class="toast-close"
                                                title="Close"
                                                on:click=move |_| toasts.hide(&id_close)
                                            >
                                                "×"
                                            </button>
                                        }
                                    }
                                </Show>
                            </div>
                            <Show when={
                                let body = body.clone();
                                move || !body().is_empty()
                            }>
                                <div class="toast-message">{body.clone()}</div>
                            </Show>
                        </div>
                    }
                }
            />
        </div>
    }
}
