use leptos::prelude::*;

use super::entry_card::EntryCard;
use super::view_model::DataEntryVm;
use crate::domain::a003_catalog::ui::ModelGuidePopup;
use crate::layout::global_context::use_app_context;
use crate::shared::components::ui::Button;
use crate::shared::icons::icon;

#[component]
pub fn DataEntryPage() -> impl IntoView {
    let ctx = use_app_context();
    let vm = DataEntryVm::new();

    if !ctx.branches.with_untracked(|dir| dir.is_loaded()) {
        ctx.load_branches();
    }
    vm.load_categories();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="page data-entry">
            <div class="page__header">
                <h1 class="page__title">"POP Materials Data Entry"</h1>
            </div>

            {move || ctx.branches_error.get().map(|e| view! {
                <div class="alert alert--warning">
                    {format!("Branch suggestions are unavailable: {}", e)}
                </div>
            })}
            {move || vm.error.get().map(|e| view! {
                <div class="alert alert--error">{e}</div>
            })}
            {move || vm.success.get().map(|msg| view! {
                <div class="alert alert--success">{msg}</div>
            })}

            <form class="data-entry__form" novalidate=true on:submit=on_submit>
                <For
                    each=move || vm.entries.with(|list| list.indices())
                    key=|index| *index
                    children=move |index| view! { <EntryCard vm=vm index=index /> }
                />

                <div class="form__actions">
                    <Button
                        variant="secondary"
                        on_click=Callback::new(move |_| vm.add_entry())
                    >
                        {icon("plus")}
                        " Add Another Model"
                    </Button>
                    <Button
                        button_type="submit"
                        busy=vm.is_saving
                        busy_text="Saving..."
                    >
                        "Submit"
                    </Button>
                </div>
            </form>

            <Show when=move || vm.is_saving.get()>
                <div class="saving-overlay">
                    <div class="saving-overlay__spinner"></div>
                    <p>"Saving your entries..."</p>
                </div>
            </Show>
            <Show when=move || vm.saved_overlay.get()>
                <div class="saving-overlay saving-overlay--done">
                    <p class="saving-overlay__done">"Saved successfully!"</p>
                </div>
            </Show>

            {move || vm.guide.get().map(|guide| view! {
                <ModelGuidePopup
                    image_url=guide.url
                    title=guide.title
                    on_close=Callback::new(move |_| vm.guide.set(None))
                />
            })}
        </div>
    }
}
