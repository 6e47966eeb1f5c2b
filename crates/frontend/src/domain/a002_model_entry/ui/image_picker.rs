use contracts::shared::image_policy::IMAGE_INPUT_ACCEPT;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

use super::picked_file::files_from_list;
use super::view_model::DataEntryVm;
use crate::domain::a002_model_entry::images::describe;
use crate::shared::icons::icon;

struct PreviewLine {
    position: usize,
    title: String,
    size_label: String,
    preview: Option<String>,
}

/// File input, drop zone and preview list of one row
#[component]
pub fn ImagePicker(vm: DataEntryVm, index: usize) -> impl IntoView {
    let input_ref = NodeRef::<html::Input>::new();
    let dragging = RwSignal::new(false);
    let input_id = format!("images_{}", index);

    let on_change = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        vm.add_images(index, files_from_list(input.files()));
        // same file may be picked again after removal
        input.set_value("");
    };

    let on_drag_over = move |ev: ev::DragEvent| {
        ev.prevent_default();
        dragging.set(true);
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        dragging.set(false);
        let files = ev.data_transfer().and_then(|dt| dt.files());
        vm.add_images(index, files_from_list(files));
    };

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let lines = move || {
        vm.read(index, |row| {
            row.images
                .items()
                .iter()
                .enumerate()
                .map(|(position, item)| {
                    let (title, size_label) = describe(position, &item.file);
                    PreviewLine {
                        position,
                        title,
                        size_label,
                        preview: item.preview.clone(),
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    let has_images = move || vm.read(index, |row| !row.images.is_empty());

    view! {
        <div class="form__group image-picker">
            <label class="form__label" for=input_id.clone()>"Images"</label>
            <input
                node_ref=input_ref
                id=input_id
                type="file"
                multiple=true
                accept=IMAGE_INPUT_ACCEPT
                style="display: none;"
                on:change=on_change
            />
            <div
                class="image-picker__drop"
                class:image-picker__drop--active=move || dragging.get()
                on:click=open_picker
                on:dragover=on_drag_over
                on:dragleave=move |_| dragging.set(false)
                on:drop=on_drop
            >
                {icon("image")}
                <span>"Click to choose images or drop them here"</span>
                <small>"JPG, PNG, WEBP or AVIF, up to 10 MB each"</small>
            </div>
            <Show when=has_images>
                <div class="image-picker__preview">
                    <div class="image-picker__header">
                        {move || vm.read(index, |row| row.images.header_label())}
                    </div>
                    <ul class="image-picker__list">
                        {move || {
                            lines()
                                .into_iter()
                                .map(|line| {
                                    let position = line.position;
                                    view! {
                                        <li class="image-picker__item">
                                            {match line.preview {
                                                Some(src) => view! {
                                                    <img class="image-picker__thumb" src=src alt="" />
                                                }.into_any(),
                                                None => view! {
                                                    <span class="image-picker__thumb image-picker__thumb--loading">
                                                        {icon("image")}
                                                    </span>
                                                }.into_any(),
                                            }}
                                            <span class="image-picker__name">{line.title}</span>
                                            <span class="image-picker__size">{line.size_label}</span>
                                            <button
                                                type="button"
                                                class="button button--ghost button--small"
                                                title="Remove image"
                                                on:click=move |_| vm.remove_image(index, position)
                                            >
                                                {icon("x")}
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </div>
            </Show>
        </div>
    }
}
