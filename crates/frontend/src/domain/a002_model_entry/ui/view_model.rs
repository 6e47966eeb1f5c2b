use contracts::domain::a003_catalog::CatalogKind;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::model::submit_entries;
use super::picked_file::{read_data_url, PickedImage};
use crate::domain::a001_branch::api::{fetch_branch_by_code, fetch_branches};
use crate::domain::a001_branch::autocomplete::{lookup_code, CodeLookup, NavKey, BLUR_HIDE_MS};
use crate::domain::a001_branch::directory::BranchRecord;
use crate::domain::a002_model_entry::entry::{CascadeRequest, EntryList, ModelEntry};
use crate::domain::a002_model_entry::payload::{build_parts, saved_message};
use crate::domain::a002_model_entry::validation::validate_entries;
use crate::domain::a003_catalog::api::{fetch_guide_url, fetch_list};
use crate::layout::global_context::{use_app_context, AppGlobalContext};
use crate::shared::toast::{use_toasts, ToastService};

/// How long the "Saved successfully!" overlay stays up
const SAVED_OVERLAY_MS: u32 = 2000;
/// How long the success flash stays above the form
const SUCCESS_FLASH_MS: u32 = 5000;

/// Guide popup contents: image URL and title
#[derive(Debug, Clone, PartialEq)]
pub struct OpenGuide {
    pub url: String,
    pub title: String,
}

#[derive(Clone, Copy)]
pub struct DataEntryVm {
    /// `File` handles are not `Send`, so the rows live in local storage
    pub entries: RwSignal<EntryList<PickedImage>, LocalStorage>,
    pub categories: RwSignal<Vec<String>>,
    pub categories_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
    pub saved_overlay: RwSignal<bool>,
    pub guide: RwSignal<Option<OpenGuide>>,
    ctx: AppGlobalContext,
    toasts: ToastService,
}

impl DataEntryVm {
    pub fn new() -> Self {
        Self {
            entries: RwSignal::new_local(EntryList::new()),
            categories: RwSignal::new(Vec::new()),
            categories_loading: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
            is_saving: RwSignal::new(false),
            saved_overlay: RwSignal::new(false),
            guide: RwSignal::new(None),
            ctx: use_app_context(),
            toasts: use_toasts(),
        }
    }

    /// Reads one value out of a row; `R::default()` once the row is gone
    pub fn read<R: Default>(&self, index: usize, f: impl FnOnce(&ModelEntry<PickedImage>) -> R) -> R {
        self.entries
            .with(|list| list.get(index).map(f))
            .unwrap_or_default()
    }

    fn update_row<R>(&self, index: usize, f: impl FnOnce(&mut ModelEntry<PickedImage>) -> R) -> Option<R> {
        let mut out = None;
        self.entries.update(|list| {
            out = list.get_mut(index).map(f);
        });
        out
    }

    pub fn load_categories(&self) {
        let categories = self.categories;
        let loading = self.categories_loading;
        let error = self.error;
        loading.set(true);
        spawn_local(async move {
            match fetch_list(CatalogKind::Categories, None).await {
                Ok(list) => {
                    log::info!("Loaded {} categories", list.len());
                    categories.set(list);
                }
                Err(e) => {
                    log::error!("Failed to load categories: {}", e);
                    error.set(Some(format!("Failed to load categories: {}", e)));
                }
            }
            loading.set(false);
        });
    }

    // --- branch autocomplete ---

    pub fn branch_input(&self, index: usize, text: String) {
        let term = self.update_row(index, |row| row.branch_input(&text)).flatten();
        if let Some(term) = term {
            self.search_branches(index, term);
        }
    }

    pub fn branch_focus(&self, index: usize, text: String) {
        let term = self
            .update_row(index, |row| row.autocomplete.focus(&text))
            .flatten();
        if let Some(term) = term {
            self.search_branches(index, term);
        }
    }

    /// Local suggestions right away, then the server's when enabled
    fn search_branches(&self, index: usize, term: String) {
        let local = self.ctx.branches.with_untracked(|dir| dir.search(&term));
        self.update_row(index, |row| row.autocomplete.show_results(&term, local));

        if !self.ctx.remote_branch_search.get_untracked() {
            return;
        }
        let vm = *self;
        spawn_local(async move {
            match fetch_branches(Some(&term)).await {
                Ok(remote) => {
                    vm.ctx.branches.update(|dir| dir.merge_remote(&remote));
                    let merged = vm.ctx.branches.with_untracked(|dir| dir.search(&term));
                    let applied = vm
                        .update_row(index, |row| row.autocomplete.show_results(&term, merged))
                        .unwrap_or(false);
                    if !applied {
                        log::debug!("branch search for {:?} is stale", term);
                    }
                }
                Err(e) => log::error!("Branch search failed: {}", e),
            }
        });
    }

    pub fn branch_blur(&self, index: usize) {
        let Some(ticket) = self.update_row(index, |row| row.autocomplete.blur()).flatten() else {
            return;
        };
        let vm = *self;
        spawn_local(async move {
            TimeoutFuture::new(BLUR_HIDE_MS as u32).await;
            vm.update_row(index, |row| row.autocomplete.blur_elapsed(ticket));
        });
    }

    pub fn branch_key(&self, index: usize, key: NavKey) {
        self.update_row(index, |row| {
            if let Some(record) = row.autocomplete.key(key) {
                row.select_branch(record);
            }
        });
    }

    pub fn select_branch(&self, index: usize, record: BranchRecord) {
        self.update_row(index, |row| row.select_branch(record));
    }

    /// A typed shop code that matches a known branch selects it
    pub fn shop_code_input(&self, index: usize, code: String) {
        let accepted = self
            .update_row(index, |row| row.shop_code_input(&code))
            .unwrap_or(false);
        if !accepted {
            return;
        }

        let remote = self.ctx.remote_branch_search.get_untracked();
        let lookup = self
            .ctx
            .branches
            .with_untracked(|dir| lookup_code(dir, &code, remote));
        match lookup {
            CodeLookup::Found(record) => self.select_branch(index, record),
            CodeLookup::Remote(code) => {
                let vm = *self;
                spawn_local(async move {
                    match fetch_branch_by_code(&code).await {
                        Ok(Some(branch)) => {
                            vm.ctx.branches.update(|dir| dir.merge_remote(&[branch]));
                            let record = vm
                                .ctx
                                .branches
                                .with_untracked(|dir| dir.lookup_by_code(&code).cloned());
                            let still_typed =
                                vm.read(index, |row| row.shop_code.trim() == code && !row.shop_code_readonly());
                            if let (Some(record), true) = (record, still_typed) {
                                vm.select_branch(index, record);
                            }
                        }
                        Ok(None) => log::debug!("no branch on file for code {}", code),
                        Err(e) => log::error!("Branch lookup failed: {}", e),
                    }
                });
            }
            CodeLookup::TooShort | CodeLookup::NotFound => {}
        }
    }

    // --- catalog cascade ---

    fn dispatch(&self, request: CascadeRequest) {
        let vm = *self;
        match request {
            CascadeRequest::List { row, kind, token } => spawn_local(async move {
                let result = fetch_list(kind, Some(&token)).await.map_err(|e| {
                    log::error!("Failed to load {:?} for {}: {}", kind, token, e);
                    e.to_string()
                });
                vm.update_row(row, |entry| entry.apply_list(kind, &token, result));
            }),
            CascadeRequest::Guide { row, category, model } => spawn_local(async move {
                let result = fetch_guide_url(&category, &model)
                    .await
                    .map_err(|e| e.to_string());
                vm.update_row(row, |entry| entry.apply_guide(&model, result));
            }),
        }
    }

    pub fn set_category(&self, index: usize, value: String) {
        if let Some(request) = self.update_row(index, |row| row.set_category(&value)).flatten() {
            self.dispatch(request);
        }
    }

    pub fn set_model(&self, index: usize, value: String) {
        let requests = self
            .update_row(index, |row| row.set_model(&value))
            .unwrap_or_default();
        for request in requests {
            self.dispatch(request);
        }
    }

    pub fn set_display_type(&self, index: usize, value: String) {
        self.update_row(index, |row| row.set_display_type(&value));
    }

    pub fn toggle_pop(&self, index: usize, material: String, checked: bool) {
        self.update_row(index, |row| row.toggle_pop(&material, checked));
    }

    pub fn open_comment(&self, index: usize) {
        self.update_row(index, |row| row.open_comment());
    }

    pub fn set_comment(&self, index: usize, text: String) {
        self.update_row(index, |row| row.set_comment(&text));
    }

    pub fn remove_comment(&self, index: usize) {
        self.update_row(index, |row| row.remove_comment());
    }

    pub fn open_guide(&self, index: usize) {
        let guide = self.read(index, |row| {
            row.guide().map(|url| OpenGuide {
                url: url.to_string(),
                title: format!("{} Display Guide", row.model.trim()),
            })
        });
        self.guide.set(guide);
    }

    // --- images ---

    /// Input change and drop both land here
    pub fn add_images(&self, index: usize, files: Vec<PickedImage>) {
        if files.is_empty() {
            return;
        }
        let outcome = self.update_row(index, |row| row.images.add_files(files));
        match outcome {
            Some(Ok(outcome)) => {
                if let Some(warning) = outcome.warning() {
                    self.toasts.warning("Too many images", warning);
                }
                for key in outcome.keys().iter().copied() {
                    self.load_preview(index, key);
                }
            }
            Some(Err(e)) => {
                self.toasts.error("Image not added", e.to_string());
            }
            None => {}
        }
    }

    fn load_preview(&self, index: usize, key: u64) {
        let file = self.read(index, |row| {
            row.images
                .items()
                .iter()
                .find(|item| item.key == key)
                .map(|item| (row.serial, item.file.0.clone()))
        });
        let Some((serial, file)) = file else {
            return;
        };
        let vm = *self;
        spawn_local(async move {
            match read_data_url(&file).await {
                Ok(url) => {
                    vm.entries.update(|list| {
                        if let Some(row) = list.get_current_mut(index, serial) {
                            row.images.set_preview(key, url);
                        }
                    });
                }
                Err(e) => log::error!("Preview failed: {}", e),
            }
        });
    }

    pub fn remove_image(&self, index: usize, position: usize) {
        self.update_row(index, |row| row.images.remove(position));
    }

    // --- rows ---

    pub fn add_entry(&self) {
        let mut index = 0;
        self.entries.update(|list| index = list.add());
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            scroll_to_entry(index);
        });
    }

    pub fn remove_entry(&self, index: usize) {
        let mut result = Ok(());
        self.entries.update(|list| result = list.remove(index));
        if let Err(e) = result {
            self.error.set(Some(e.to_string()));
        }
    }

    // --- submit ---

    pub fn submit(&self) {
        if self.is_saving.get_untracked() {
            return;
        }
        self.error.set(None);
        self.success.set(None);

        let mut valid = Ok(());
        self.entries.update(|list| valid = validate_entries(list));
        if let Err(e) = valid {
            self.error.set(Some(e.to_string()));
            return;
        }

        self.ctx
            .branches
            .update(|dir| self.entries.with_untracked(|list| list.register_unknown_branches(dir)));
        let parts = self.entries.with_untracked(build_parts);

        self.is_saving.set(true);
        let vm = *self;
        spawn_local(async move {
            match submit_entries(&parts).await {
                Ok(message) => {
                    log::info!("Form saved: {}", message);
                    vm.ctx.branches.update(|dir| dir.promote_all());
                    vm.entries.update(|list| list.reset());
                    vm.is_saving.set(false);
                    vm.saved_overlay.set(true);
                    vm.success.set(Some(saved_message(&message)));
                    TimeoutFuture::new(SAVED_OVERLAY_MS).await;
                    vm.saved_overlay.set(false);
                    TimeoutFuture::new(SUCCESS_FLASH_MS - SAVED_OVERLAY_MS).await;
                    vm.success.set(None);
                }
                Err(e) => {
                    log::error!("Submit failed: {}", e);
                    vm.is_saving.set(false);
                    vm.error.set(Some(e.to_string()));
                }
            }
        });
    }
}

fn scroll_to_entry(index: usize) {
    let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&format!("model_entry_{}", index)))
    else {
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}
