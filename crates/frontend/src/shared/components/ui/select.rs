use leptos::prelude::*;

/// Labelled select over plain string options.
///
/// The first `<option>` is an empty placeholder, so an empty `value` means
/// nothing is chosen.
#[component]
pub fn Select(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    #[prop(into)]
    options: Signal<Vec<String>>,
    /// Text of the empty option, e.g. "Select model" or "Loading..."
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    #[prop(optional, into)]
    invalid: MaybeProp<bool>,
    #[prop(optional)]
    required: bool,
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let select_id = move || id.get().unwrap_or_default();
    let select_class = move || {
        if invalid.get().unwrap_or(false) {
            "form__select form__select--invalid"
        } else {
            "form__select"
        }
    };

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=select_id>
                    {l}
                    {required.then_some(" *")}
                </label>
            })}
            <select
                id=select_id
                class=select_class
                disabled=move || disabled.get().unwrap_or(false)
                required=required
                prop:value=move || value.get()
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_value(&ev));
                    }
                }
            >
                <option value="">{move || placeholder.get().unwrap_or_default()}</option>
                <For
                    each=move || options.get()
                    key=|val| val.clone()
                    children=move |val| {
                        let label = val.clone();
                        let current = val.clone();
                        let is_selected = move || value.get() == current;
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
