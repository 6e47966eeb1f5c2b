//! Service worker registration and the browser install events

use contracts::shared::offline_shell::{SERVICE_WORKER_PATH, SKIP_WAITING_MESSAGE};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{ServiceWorker, ServiceWorkerRegistration, ServiceWorkerState};

use super::installer::{is_installed, Browser, InstallAction, InstallState, PromptOutcome};
use crate::shared::toast::{ToastKind, ToastOptions, ToastService};

/// Wait before the install button shows without a captured prompt
const FALLBACK_DELAY_MS: u32 = 1000;
const INSTALL_PROGRESS_MS: u32 = 3000;

#[derive(Deserialize)]
struct UserChoice {
    outcome: String,
}

#[derive(Serialize)]
struct WorkerMessage {
    #[serde(rename = "type")]
    kind: &'static str,
}

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

fn detect_installed(window: &web_sys::Window) -> bool {
    let standalone_display = window
        .match_media("(display-mode: standalone)")
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false);
    let ios_standalone = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("standalone"))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let referrer = window.document().map(|d| d.referrer()).unwrap_or_default();
    is_installed(standalone_display, ios_standalone, &referrer)
}

/// Install and update state of the app, shared by the install button,
/// its dialogs and the update banner
#[derive(Clone, Copy)]
pub struct PwaController {
    pub state: RwSignal<InstallState>,
    pub update_ready: RwSignal<bool>,
    deferred_prompt: StoredValue<Option<JsValue>, LocalStorage>,
    registration: StoredValue<Option<ServiceWorkerRegistration>, LocalStorage>,
    toasts: ToastService,
}

impl PwaController {
    /// Hooks the window events and registers the service worker
    pub fn start(toasts: ToastService) -> Self {
        let installed = web_sys::window()
            .map(|w| detect_installed(&w))
            .unwrap_or(false);
        if installed {
            log::info!("App is running in standalone mode");
        }

        let this = Self {
            state: RwSignal::new(InstallState::new(installed)),
            update_ready: RwSignal::new(false),
            deferred_prompt: StoredValue::new_local(None),
            registration: StoredValue::new_local(None),
            toasts,
        };
        this.listen();
        this.register_worker();
        this.schedule_fallback();
        this
    }

    fn listen(self) {
        let prompt = window_event_listener_untyped("beforeinstallprompt", move |ev| {
            log::debug!("Install prompt available");
            ev.prevent_default();
            self.deferred_prompt.set_value(Some(ev.into()));
            self.state.update(|s| s.prompt_captured());
        });
        let installed = window_event_listener_untyped("appinstalled", move |_| {
            log::info!("App installed");
            self.deferred_prompt.set_value(None);
            self.state.update(|s| s.app_installed());
            self.toasts.success(
                "App installed successfully!",
                "You can now access it from your home screen",
            );
        });
        let online = window_event_listener_untyped("online", move |_| {
            self.toasts.success("Online", "Connection restored");
        });
        let offline = window_event_listener_untyped("offline", move |_| {
            self.toasts.warning("Offline", "Working in offline mode");
        });
        on_cleanup(move || {
            prompt.remove();
            installed.remove();
            online.remove();
            offline.remove();
        });
    }

    fn service_worker_supported() -> bool {
        web_sys::window()
            .map(|w| has_property(&w.navigator(), "serviceWorker"))
            .unwrap_or(false)
    }

    fn register_worker(self) {
        if !Self::service_worker_supported() {
            log::warn!("Service workers are not supported in this browser");
            return;
        }
        spawn_local(async move {
            let Some(window) = web_sys::window() else {
                return;
            };
            let container = window.navigator().service_worker();
            let registration = match JsFuture::from(container.register(SERVICE_WORKER_PATH)).await
            {
                Ok(value) => match value.dyn_into::<ServiceWorkerRegistration>() {
                    Ok(registration) => registration,
                    Err(e) => {
                        log::error!("Unexpected registration object: {:?}", e);
                        return;
                    }
                },
                Err(e) => {
                    log::error!("Service worker registration failed: {:?}", e);
                    return;
                }
            };
            log::info!("Service worker registered for {}", registration.scope());

            let update_ready = self.update_ready;
            let watched = registration.clone();
            let on_update_found = Closure::<dyn FnMut()>::new(move || {
                if let Some(worker) = watched.installing() {
                    watch_installing(worker, update_ready);
                }
            });
            registration.set_onupdatefound(Some(on_update_found.as_ref().unchecked_ref()));
            // Lives as long as the registration
            on_update_found.forget();

            self.registration.set_value(Some(registration));
        });
    }

    fn schedule_fallback(self) {
        let supported = Self::service_worker_supported()
            && web_sys::window()
                .map(|w| has_property(&w, "PushManager"))
                .unwrap_or(false);
        spawn_local(async move {
            TimeoutFuture::new(FALLBACK_DELAY_MS).await;
            self.state.update(|s| s.fallback_elapsed(supported));
        });
    }

    /// Install button click: the deferred prompt when there is one,
    /// otherwise manual instructions for this browser
    pub fn install(&self) {
        let prompt = match self.state.with_untracked(|s| s.click()) {
            InstallAction::ShowPrompt => self.deferred_prompt.try_update_value(|p| p.take()).flatten(),
            InstallAction::ShowInstructions => None,
        };
        let Some(prompt) = prompt else {
            self.show_instructions();
            return;
        };

        let this = *self;
        spawn_local(async move {
            match run_prompt(&prompt).await {
                Ok(outcome) => {
                    log::info!("Install prompt outcome: {:?}", outcome);
                    if outcome == PromptOutcome::Accepted {
                        this.toasts.show(
                            ToastKind::Info,
                            "Installing app...",
                            "",
                            ToastOptions {
                                duration_ms: Some(INSTALL_PROGRESS_MS),
                                ..ToastOptions::default()
                            },
                        );
                    }
                    this.state.update(|s| s.prompt_finished(outcome));
                }
                Err(e) => {
                    log::error!("Install prompt failed: {:?}", e);
                    this.state.update(|s| s.prompt_deferred = false);
                    this.show_instructions();
                }
            }
        });
    }

    fn show_instructions(&self) {
        let user_agent = web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default();
        let browser = Browser::detect(&user_agent);
        self.state.update(|s| s.show_instructions(browser));
    }

    pub fn close_dialog(&self) {
        self.state.update(|s| s.close_dialog());
    }

    /// Activates the waiting worker and reloads onto it
    pub fn apply_update(&self) {
        let waiting = self
            .registration
            .with_value(|r| r.as_ref().and_then(|r| r.waiting()));
        if let Some(worker) = waiting {
            let message = WorkerMessage {
                kind: SKIP_WAITING_MESSAGE,
            };
            match serde_wasm_bindgen::to_value(&message) {
                Ok(value) => {
                    if let Err(e) = worker.post_message(&value) {
                        log::warn!("Failed to message the waiting worker: {:?}", e);
                    }
                }
                Err(e) => log::warn!("Failed to encode worker message: {}", e),
            }
        }
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }

    pub fn dismiss_update(&self) {
        self.update_ready.set(false);
    }
}

fn watch_installing(worker: ServiceWorker, update_ready: RwSignal<bool>) {
    let watched = worker.clone();
    let on_state_change = Closure::<dyn FnMut()>::new(move || {
        let has_controller = web_sys::window()
            .and_then(|w| w.navigator().service_worker().controller())
            .is_some();
        if watched.state() == ServiceWorkerState::Installed && has_controller {
            log::info!("New service worker installed");
            update_ready.set(true);
        }
    });
    worker.set_onstatechange(Some(on_state_change.as_ref().unchecked_ref()));
    on_state_change.forget();
}

/// Shows the deferred `beforeinstallprompt` and waits for the user's answer
async fn run_prompt(event: &JsValue) -> Result<PromptOutcome, JsValue> {
    let prompt: js_sys::Function = js_sys::Reflect::get(event, &JsValue::from_str("prompt"))?
        .dyn_into()?;
    prompt.call0(event)?;

    let choice: js_sys::Promise = js_sys::Reflect::get(event, &JsValue::from_str("userChoice"))?
        .dyn_into()?;
    let choice = JsFuture::from(choice).await?;
    let choice: UserChoice = serde_wasm_bindgen::from_value(choice)?;
    Ok(PromptOutcome::parse(&choice.outcome))
}
