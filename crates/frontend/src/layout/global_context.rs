use leptos::prelude::*;

use crate::domain::a001_branch::api::fetch_branches;
use crate::domain::a001_branch::directory::BranchDirectory;
use crate::shared::storage;

/// Page-wide state shared by every form row
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub branches: RwSignal<BranchDirectory>,
    /// Refine local suggestions with `/get_branches?search=`
    pub remote_branch_search: RwSignal<bool>,
    pub branches_error: RwSignal<Option<String>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            branches: RwSignal::new(BranchDirectory::new()),
            remote_branch_search: RwSignal::new(storage::remote_branch_search_enabled()),
            branches_error: RwSignal::new(None),
        }
    }

    /// Loads the full branch list into the directory; records come in locked
    pub fn load_branches(&self) {
        let branches = self.branches;
        let error = self.branches_error;
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_branches(None).await {
                Ok(list) => {
                    log::info!("Loaded {} branches", list.len());
                    branches.update(|dir| dir.load(&list));
                    error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load branches: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_app_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext context not found")
}
