use leptos::prelude::*;

use crate::domain::a001_branch::autocomplete::{Autocomplete, NavKey};
use crate::domain::a001_branch::directory::BranchRecord;
use crate::shared::icons::icon;

/// Branch name with suggestions plus the shop-code input it fills.
///
/// Pure view: every event is forwarded to the owning row, which holds the
/// autocomplete state and decides what to search.
#[component]
pub fn BranchField(
    /// Row index, used for element ids
    index: usize,
    #[prop(into)] branch: Signal<String>,
    #[prop(into)] shop_code: Signal<String>,
    /// Shop code came from a locked directory record
    #[prop(into)]
    locked: Signal<bool>,
    #[prop(into)] autocomplete: Signal<Autocomplete>,
    #[prop(into)] branch_invalid: Signal<bool>,
    #[prop(into)] code_invalid: Signal<bool>,
    on_branch_input: Callback<String>,
    on_focus: Callback<String>,
    on_blur: Callback<()>,
    on_key: Callback<NavKey>,
    on_select: Callback<BranchRecord>,
    on_code_input: Callback<String>,
) -> impl IntoView {
    let branch_id = format!("branch_{}", index);
    let code_id = format!("shop_code_{}", index);
    let list_id = format!("branch_suggestions_{}", index);

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        let Some(key) = NavKey::from_key(&ev.key()) else {
            return;
        };
        let list_open = autocomplete.with_untracked(|a| a.list_visible());
        if list_open && key != NavKey::Escape {
            ev.prevent_default();
        }
        on_key.run(key);
    };

    let suggestions_view = move || {
        autocomplete.with(|state| {
            if !state.list_visible() {
                return None;
            }
            let highlight = state.highlight();
            let items = state
                .suggestions()
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    let chosen = record.clone();
                    let active = highlight == Some(i);
                    let code = if record.shop_code.is_empty() {
                        "No Code".to_string()
                    } else {
                        record.shop_code.clone()
                    };
                    view! {
                        <li
                            class="autocomplete__item"
                            class:autocomplete__item--active=active
                            on:click=move |_| on_select.run(chosen.clone())
                        >
                            <span class="autocomplete__name">{record.name.clone()}</span>
                            <span class="autocomplete__code">{code}</span>
                            {record.locked.then(|| icon("lock"))}
                        </li>
                    }
                })
                .collect_view();
            let new_branch = state.offers_new_branch().then(|| {
                view! {
                    <li class="autocomplete__item autocomplete__item--new">
                        {icon("plus")}
                        " New branch: enter its shop code"
                    </li>
                }
            });
            Some(view! {
                <ul id=list_id.clone() class="autocomplete__list">
                    {items}
                    {new_branch}
                </ul>
            })
        })
    };

    view! {
        <div class="branch-field">
            <div class="form__group autocomplete">
                <label class="form__label" for=branch_id.clone()>"Branch Name *"</label>
                <input
                    id=branch_id.clone()
                    class="form__input"
                    class:form__input--invalid=move || branch_invalid.get()
                    type="text"
                    autocomplete="off"
                    placeholder="Start typing a branch name"
                    prop:value=move || branch.get()
                    on:input=move |ev| on_branch_input.run(event_target_value(&ev))
                    on:focus=move |ev| on_focus.run(event_target_value(&ev))
                    on:blur=move |_| on_blur.run(())
                    on:keydown=on_keydown
                />
                {suggestions_view}
            </div>
            <div class="form__group">
                <label class="form__label" for=code_id.clone()>
                    "Shop Code *"
                    {move || locked.get().then(|| view! {
                        <span class="branch-field__lock" title="Shop code is on file for this branch">
                            {icon("lock")}
                        </span>
                    })}
                </label>
                <input
                    id=code_id
                    class="form__input"
                    class:form__input--invalid=move || code_invalid.get()
                    class:form__input--readonly=move || locked.get()
                    type="text"
                    autocomplete="off"
                    placeholder="Shop code"
                    readonly=move || locked.get()
                    prop:value=move || shop_code.get()
                    on:input=move |ev| on_code_input.run(event_target_value(&ev))
                />
            </div>
        </div>
    }
}
