use contracts::domain::a002_model_entry::EntryField;
use leptos::prelude::*;

use super::image_picker::ImagePicker;
use super::picked_file::PickedImage;
use super::view_model::DataEntryVm;
use crate::domain::a001_branch::ui::BranchField;
use crate::domain::a002_model_entry::entry::ModelEntry;
use crate::shared::components::ui::{Button, Checkbox, Select, Textarea};
use crate::shared::icons::icon;

type Row = ModelEntry<PickedImage>;

/// One "Model Entry k" block of the form
#[component]
pub fn EntryCard(vm: DataEntryVm, index: usize) -> impl IntoView {
    let text = move |f: fn(&Row) -> String| {
        Signal::derive(move || vm.read(index, f))
    };
    let invalid = move |field: EntryField| Signal::derive(move || vm.read(index, |row| row.is_invalid(field)));

    let category = text(|row| row.category.clone());
    let model = text(|row| row.model.clone());
    let display_type = text(|row| row.display_type.clone());

    let models = Signal::derive(move || vm.read(index, |row| row.models.value().clone()));
    let display_types = Signal::derive(move || vm.read(index, |row| row.display_types.value().clone()));

    let model_placeholder = Signal::derive(move || {
        vm.read(index, |row| {
            if row.category.trim().is_empty() {
                "Select a category first".to_string()
            } else if row.models.is_loading() {
                "Loading...".to_string()
            } else {
                "Select model".to_string()
            }
        })
    });
    let display_placeholder = Signal::derive(move || {
        vm.read(index, |row| {
            if row.display_types.is_loading() {
                "Loading...".to_string()
            } else {
                "Select display type".to_string()
            }
        })
    });
    let models_disabled =
        Signal::derive(move || vm.read(index, |row| row.category.trim().is_empty() || row.models.is_loading()));

    let list_errors = move || {
        vm.read(index, |row| {
            [row.models.error(), row.display_types.error(), row.pop_options.error()]
                .into_iter()
                .flatten()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
    };

    let sections_visible = move || vm.read(index, |row| row.sections_visible());
    let has_guide = move || vm.read(index, |row| row.guide().is_some());
    let comment_open = move || vm.read(index, |row| row.comment.is_some());

    view! {
        <section id=format!("model_entry_{}", index) class="entry-card">
            <div class="entry-card__header">
                <h3 class="entry-card__title">{move || vm.entries.with(|list| list.header(index))}</h3>
                <button
                    type="button"
                    class="button button--ghost button--small"
                    title="Remove this entry"
                    on:click=move |_| vm.remove_entry(index)
                >
                    {icon("trash")}
                </button>
            </div>

            <BranchField
                index=index
                branch=text(|row| row.branch.clone())
                shop_code=text(|row| row.shop_code.clone())
                locked=Signal::derive(move || vm.read(index, |row| row.shop_code_readonly()))
                autocomplete=Signal::derive(move || vm.read(index, |row| row.autocomplete.clone()))
                branch_invalid=invalid(EntryField::Branch)
                code_invalid=invalid(EntryField::ShopCode)
                on_branch_input=Callback::new(move |value| vm.branch_input(index, value))
                on_focus=Callback::new(move |value| vm.branch_focus(index, value))
                on_blur=Callback::new(move |_| vm.branch_blur(index))
                on_key=Callback::new(move |key| vm.branch_key(index, key))
                on_select=Callback::new(move |record| vm.select_branch(index, record))
                on_code_input=Callback::new(move |value| vm.shop_code_input(index, value))
            />

            <div class="entry-card__row">
                <Select
                    label="Category"
                    required=true
                    id=format!("category_{}", index)
                    value=category
                    options=vm.categories
                    placeholder=Signal::derive(move || {
                        if vm.categories_loading.get() { "Loading...".to_string() } else { "Select category".to_string() }
                    })
                    invalid=invalid(EntryField::Category)
                    on_change=Callback::new(move |value| vm.set_category(index, value))
                />
                <Select
                    label="Model"
                    required=true
                    id=format!("model_{}", index)
                    value=model
                    options=models
                    placeholder=model_placeholder
                    disabled=models_disabled
                    invalid=invalid(EntryField::Model)
                    on_change=Callback::new(move |value| vm.set_model(index, value))
                />
                <Show when=has_guide>
                    <Button
                        variant="secondary"
                        size="sm"
                        class="entry-card__guide"
                        on_click=Callback::new(move |_| vm.open_guide(index))
                    >
                        {icon("image")}
                        " View Guide"
                    </Button>
                </Show>
            </div>

            {move || {
                list_errors()
                    .into_iter()
                    .map(|message| view! { <div class="alert alert--error">{message}</div> })
                    .collect_view()
            }}

            <Show when=sections_visible>
                <Select
                    label="Display Type"
                    required=true
                    id=format!("display_type_{}", index)
                    value=display_type
                    options=display_types
                    placeholder=display_placeholder
                    invalid=invalid(EntryField::DisplayType)
                    on_change=Callback::new(move |value| vm.set_display_type(index, value))
                />

                <div class="form__group pop-materials">
                    <span class="form__label">"POP Materials"</span>
                    {move || {
                        let (loading, empty, options) = vm.read(index, |row| {
                            (
                                row.pop_options.is_loading(),
                                row.pop_empty_message(),
                                row.pop_options.value().clone(),
                            )
                        });
                        if loading {
                            return view! { <p class="form__hint">"Loading..."</p> }.into_any();
                        }
                        if let Some(message) = empty {
                            return view! { <p class="form__hint">{message}</p> }.into_any();
                        }
                        options
                            .into_iter()
                            .enumerate()
                            .map(|(i, material)| {
                                let name = material.clone();
                                let checked_name = material.clone();
                                view! {
                                    <Checkbox
                                        id=format!("pop_{}_{}", index, i)
                                        name=format!("pop_materials_{}", index)
                                        label=material
                                        checked=Signal::derive(move || {
                                            vm.read(index, |row| row.pop_materials.contains(&checked_name))
                                        })
                                        on_change=Callback::new(move |checked| {
                                            vm.toggle_pop(index, name.clone(), checked)
                                        })
                                    />
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </div>

                <div class="entry-card__comment">
                    <Show
                        when=comment_open
                        fallback=move || view! {
                            <Button
                                variant="ghost"
                                size="sm"
                                on_click=Callback::new(move |_| vm.open_comment(index))
                            >
                                {icon("comment")}
                                " Add Comment"
                            </Button>
                        }
                    >
                        <Textarea
                            label="Comment"
                            id=format!("comment_{}", index)
                            placeholder="Add your comment here... (unlimited characters)"
                            hint="Comments will appear in reports"
                            value=text(|row| row.comment.clone().unwrap_or_default())
                            on_input=Callback::new(move |value| vm.set_comment(index, value))
                        />
                        <Button
                            variant="ghost"
                            size="sm"
                            on_click=Callback::new(move |_| vm.remove_comment(index))
                        >
                            {icon("x")}
                            " Remove Comment"
                        </Button>
                    </Show>
                </div>

                <ImagePicker vm=vm index=index />
            </Show>
        </section>
    }
}
