//! Offline shell: precache manifest and request routing for the service worker

/// Single cache version; every other cache name is purged on activate
pub const CACHE_NAME: &str = "rm-team-v1.0.0";

pub const SERVICE_WORKER_PATH: &str = "/static/sw.js";

pub const STATIC_PREFIX: &str = "/static/";

/// Document served to navigations when both network and exact cache miss
pub const ROOT_DOCUMENT: &str = "/";

/// Message type the page posts to activate a waiting worker
pub const SKIP_WAITING_MESSAGE: &str = "SKIP_WAITING";

pub const PRECACHE_URLS: [&str; 8] = [
    "/",
    "/static/css/style.css",
    "/static/css/mobile_buttons_fix.css",
    "/static/pkg/frontend.js",
    "/static/pkg/frontend_bg.wasm",
    "/static/manifest.json",
    "/static/icons/icon-192x192.png",
    "/static/icons/icon-512x512.png",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Not handled by the worker at all
    Passthrough,
    /// Cached copy if present, network otherwise
    CacheFirst,
    /// Network, storing 200 responses; cache and root document as fallbacks
    NetworkFirst,
}

pub fn strategy_for(url: &str) -> FetchStrategy {
    if !url.starts_with("http") {
        return FetchStrategy::Passthrough;
    }
    if url.contains(STATIC_PREFIX) {
        FetchStrategy::CacheFirst
    } else {
        FetchStrategy::NetworkFirst
    }
}

/// Only complete successful responses are written back to the cache
pub fn should_store(status: u16) -> bool {
    status == 200
}

/// Fallback document for a request that missed both network and cache
pub fn offline_fallback(is_navigation: bool) -> Option<&'static str> {
    is_navigation.then_some(ROOT_DOCUMENT)
}

/// Cache names left over from previous versions
pub fn stale_caches<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    names.into_iter().filter(|name| *name != CACHE_NAME).collect()
}

/// A worker whose precache failed keeps waiting; only a complete shell
/// takes over from the running worker
pub fn skips_waiting_after_install<E>(precache: &Result<(), E>) -> bool {
    precache.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_for() {
        assert_eq!(
            strategy_for("https://pop.example.com/static/css/style.css"),
            FetchStrategy::CacheFirst
        );
        assert_eq!(
            strategy_for("https://pop.example.com/data_entry"),
            FetchStrategy::NetworkFirst
        );
        assert_eq!(
            strategy_for("chrome-extension://abc/static/x.js"),
            FetchStrategy::Passthrough
        );
    }

    #[test]
    fn test_fallbacks() {
        assert!(should_store(200));
        assert!(!should_store(206));
        assert!(!should_store(500));
        assert_eq!(offline_fallback(true), Some("/"));
        assert_eq!(offline_fallback(false), None);
    }

    #[test]
    fn test_stale_caches() {
        let names = ["rm-team-v0.9.0", CACHE_NAME, "other"];
        assert_eq!(stale_caches(names), vec!["rm-team-v0.9.0", "other"]);
    }

    #[test]
    fn test_precache_covers_root_document() {
        assert!(PRECACHE_URLS.contains(&ROOT_DOCUMENT));
    }

    #[test]
    fn test_failed_precache_keeps_waiting() {
        assert!(skips_waiting_after_install::<String>(&Ok(())));
        assert!(!skips_waiting_after_install(&Err("404 /static/app.css".to_string())));
    }
}
