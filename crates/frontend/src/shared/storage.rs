use web_sys::window;

/// Overrides the API origin, e.g. when the pages are served from a CDN
pub const API_BASE_OVERRIDE_KEY: &str = "api_base_override";

/// Set to `off` to keep branch suggestions purely local
pub const BRANCH_REMOTE_SEARCH_KEY: &str = "branch_remote_search";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn get_item(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

/// API origin override, if one is stored and non-blank
pub fn get_api_base_override() -> Option<String> {
    get_item(API_BASE_OVERRIDE_KEY)
        .map(|base| base.trim().trim_end_matches('/').to_string())
        .filter(|base| !base.is_empty())
}

/// Remote refinement of branch suggestions is on unless switched off
pub fn remote_branch_search_enabled() -> bool {
    get_item(BRANCH_REMOTE_SEARCH_KEY)
        .map(|value| !value.trim().eq_ignore_ascii_case("off"))
        .unwrap_or(true)
}
