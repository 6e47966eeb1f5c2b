use leptos::prelude::*;

/// One line of a checklist: the whole row is the click target and carries
/// `name`/`value` so the choice reads like a form field
#[component]
pub fn Checkbox(
    #[prop(into)]
    label: Signal<String>,
    #[prop(into)]
    checked: Signal<bool>,
    on_change: Callback<bool>,
    #[prop(optional, into)]
    name: MaybeProp<String>,
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    view! {
        <label class="checklist__item" class:checklist__item--checked=move || checked.get()>
            <input
                id=move || id.get()
                name=move || name.get()
                value=move || label.get()
                type="checkbox"
                class="checklist__input"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <span class="checklist__label">{label}</span>
        </label>
    }
}
