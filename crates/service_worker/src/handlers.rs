use contracts::shared::offline_shell::{
    offline_fallback, should_store, skips_waiting_after_install, strategy_for, FetchStrategy,
    SKIP_WAITING_MESSAGE,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::{
    Event, ExtendableEvent, ExtendableMessageEvent, FetchEvent, Request, RequestMode, Response,
    ServiceWorkerGlobalScope,
};

use crate::cache;

#[derive(Deserialize)]
struct PageMessage {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

fn on(
    scope: &ServiceWorkerGlobalScope,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    scope.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the worker
    closure.forget();
    Ok(())
}

pub fn listen(scope: &ServiceWorkerGlobalScope) -> Result<(), JsValue> {
    let s = scope.clone();
    on(scope, "install", move |event| {
        let Ok(event) = event.dyn_into::<ExtendableEvent>() else {
            return;
        };
        let s = s.clone();
        let work = future_to_promise(async move {
            log::info!("Service worker: installing");
            let precached = cache::precache(&s).await;
            if let Err(e) = &precached {
                log::error!("Service worker: installation failed: {:?}", e);
            }
            if !skips_waiting_after_install(&precached) {
                return Ok(JsValue::UNDEFINED);
            }
            JsFuture::from(s.skip_waiting()?).await
        });
        let _ = event.wait_until(&work);
    })?;

    let s = scope.clone();
    on(scope, "activate", move |event| {
        let Ok(event) = event.dyn_into::<ExtendableEvent>() else {
            return;
        };
        let s = s.clone();
        let work = future_to_promise(async move {
            cache::purge_stale(&s).await?;
            log::info!("Service worker: activated");
            JsFuture::from(s.clients().claim()).await
        });
        let _ = event.wait_until(&work);
    })?;

    let s = scope.clone();
    on(scope, "fetch", move |event| {
        let Ok(event) = event.dyn_into::<FetchEvent>() else {
            return;
        };
        let request = event.request();
        let strategy = strategy_for(&request.url());
        if strategy == FetchStrategy::Passthrough {
            return;
        }
        let s = s.clone();
        let response = future_to_promise(async move {
            let response = match strategy {
                FetchStrategy::CacheFirst => cache_first(&s, &request).await?,
                _ => network_first(&s, &request).await?,
            };
            Ok(response.into())
        });
        if let Err(e) = event.respond_with(&response) {
            log::warn!("Service worker: respond_with failed: {:?}", e);
        }
    })?;

    let s = scope.clone();
    on(scope, "message", move |event| {
        let Ok(event) = event.dyn_into::<ExtendableMessageEvent>() else {
            return;
        };
        let message: PageMessage = match serde_wasm_bindgen::from_value(event.data()) {
            Ok(message) => message,
            Err(_) => return,
        };
        if message.kind.as_deref() == Some(SKIP_WAITING_MESSAGE) {
            log::info!("Service worker: skip waiting requested");
            if let Ok(promise) = s.skip_waiting() {
                spawn_local(async move {
                    let _ = JsFuture::from(promise).await;
                });
            }
        }
    })?;

    Ok(())
}

async fn fetch(scope: &ServiceWorkerGlobalScope, request: &Request) -> Result<Response, JsValue> {
    JsFuture::from(scope.fetch_with_request(request))
        .await?
        .dyn_into()
}

async fn cache_first(
    scope: &ServiceWorkerGlobalScope,
    request: &Request,
) -> Result<Response, JsValue> {
    if let Some(cached) = cache::lookup(scope, request).await {
        return Ok(cached);
    }
    fetch(scope, request).await
}

async fn network_first(
    scope: &ServiceWorkerGlobalScope,
    request: &Request,
) -> Result<Response, JsValue> {
    match fetch(scope, request).await {
        Ok(response) => {
            if should_store(response.status()) {
                let copy = response.clone()?;
                let (scope, request) = (scope.clone(), <Request as Clone>::clone(request));
                spawn_local(async move {
                    if let Err(e) = cache::store(&scope, &request, &copy).await {
                        log::warn!("Service worker: failed to cache {}: {:?}", request.url(), e);
                    }
                });
            }
            Ok(response)
        }
        Err(network_error) => {
            if let Some(cached) = cache::lookup(scope, request).await {
                return Ok(cached);
            }
            let navigation = request.mode() == RequestMode::Navigate;
            if let Some(url) = offline_fallback(navigation) {
                if let Some(root) = cache::lookup_url(scope, url).await {
                    return Ok(root);
                }
            }
            Err(network_error)
        }
    }
}
