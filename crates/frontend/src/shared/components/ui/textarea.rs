use leptos::html;
use leptos::prelude::*;

/// Free-text comment box. Grows with its content and takes focus when
/// it is opened.
#[component]
pub fn Textarea(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Small print under the box
    #[prop(optional, into)]
    hint: MaybeProp<String>,
    #[prop(default = 4)]
    rows: u32,
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let node = NodeRef::<html::Textarea>::new();

    let fit_content = move || {
        if let Some(el) = node.get_untracked() {
            let style = web_sys::HtmlElement::style(&el);
            let _ = style.set_property("height", "auto");
            let _ = style.set_property("height", &format!("{}px", el.scroll_height()));
        }
    };

    Effect::new(move |_| {
        if let Some(el) = node.get() {
            let _ = el.focus();
        }
    });

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=move || id.get()>{l}</label>
            })}
            <textarea
                node_ref=node
                id=move || id.get()
                name=move || id.get()
                class="form__textarea"
                placeholder=move || placeholder.get()
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| {
                    on_input.run(event_target_value(&ev));
                    fit_content();
                }
            ></textarea>
            {move || hint.get().map(|h| view! { <small class="form__hint">{h}</small> })}
        </div>
    }
}
