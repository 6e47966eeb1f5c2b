use contracts::shared::offline_shell::{stale_caches, CACHE_NAME, PRECACHE_URLS};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Cache, CacheStorage, Request, Response, ServiceWorkerGlobalScope};

async fn open(caches: &CacheStorage) -> Result<Cache, JsValue> {
    JsFuture::from(caches.open(CACHE_NAME)).await?.dyn_into()
}

/// Stores the shell files under the current cache version
pub async fn precache(scope: &ServiceWorkerGlobalScope) -> Result<(), JsValue> {
    let cache = open(&scope.caches()?).await?;
    let urls: js_sys::Array = PRECACHE_URLS.iter().map(|u| JsValue::from_str(u)).collect();
    JsFuture::from(cache.add_all_with_str_sequence(&urls)).await?;
    log::info!("Service worker: cached {} shell files", PRECACHE_URLS.len());
    Ok(())
}

/// Deletes every cache that is not the current version
pub async fn purge_stale(scope: &ServiceWorkerGlobalScope) -> Result<(), JsValue> {
    let caches = scope.caches()?;
    let keys: js_sys::Array = JsFuture::from(caches.keys()).await?.dyn_into()?;
    let names: Vec<String> = keys.iter().filter_map(|k| k.as_string()).collect();
    for name in stale_caches(names.iter().map(String::as_str)) {
        log::info!("Service worker: deleting old cache {}", name);
        JsFuture::from(caches.delete(name)).await?;
    }
    Ok(())
}

/// Cached response for `request`, if any
pub async fn lookup(scope: &ServiceWorkerGlobalScope, request: &Request) -> Option<Response> {
    let caches = scope.caches().ok()?;
    let found = JsFuture::from(caches.match_with_request(request)).await.ok()?;
    found.dyn_into::<Response>().ok()
}

/// Cached response for a plain URL, used for the root document fallback
pub async fn lookup_url(scope: &ServiceWorkerGlobalScope, url: &str) -> Option<Response> {
    let caches = scope.caches().ok()?;
    let found = JsFuture::from(caches.match_with_str(url)).await.ok()?;
    found.dyn_into::<Response>().ok()
}

pub async fn store(
    scope: &ServiceWorkerGlobalScope,
    request: &Request,
    response: &Response,
) -> Result<(), JsValue> {
    let cache = open(&scope.caches()?).await?;
    JsFuture::from(cache.put_with_request(request, response)).await?;
    Ok(())
}
