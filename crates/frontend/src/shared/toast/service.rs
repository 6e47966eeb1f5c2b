use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::queue::{ToastKind, ToastOptions, ToastPatch, ToastQueue};

fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Reactive handle to the page's toast queue, provided through context
#[derive(Clone, Copy)]
pub struct ToastService {
    queue: RwSignal<ToastQueue>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::new()),
        }
    }

    pub fn queue(&self) -> RwSignal<ToastQueue> {
        self.queue
    }

    pub fn show(
        &self,
        kind: ToastKind,
        title: impl Into<String>,
        body: impl Into<String>,
        options: ToastOptions,
    ) -> String {
        let generated = format!("toast-{}", uuid::Uuid::new_v4());
        let mut id = String::new();
        let (title, body) = (title.into(), body.into());
        self.queue.update(|q| {
            id = q.show(kind, title, body, options, generated, now_ms());
        });
        self.schedule();
        id
    }

    pub fn loading(&self, title: impl Into<String>, body: impl Into<String>, options: ToastOptions) -> String {
        self.show(ToastKind::Loading, title, body, options)
    }

    pub fn success(&self, title: impl Into<String>, body: impl Into<String>) -> String {
        self.show(ToastKind::Success, title, body, ToastOptions::default())
    }

    pub fn error(&self, title: impl Into<String>, body: impl Into<String>) -> String {
        self.show(ToastKind::Error, title, body, ToastOptions::default())
    }

    pub fn warning(&self, title: impl Into<String>, body: impl Into<String>) -> String {
        self.show(ToastKind::Warning, title, body, ToastOptions::default())
    }

    pub fn info(&self, title: impl Into<String>, body: impl Into<String>) -> String {
        self.show(ToastKind::Info, title, body, ToastOptions::default())
    }

    pub fn update(&self, id: &str, patch: ToastPatch) {
        let mut updated = false;
        self.queue.update(|q| updated = q.update(id, patch, now_ms()));
        if updated {
            self.schedule();
        } else {
            log::debug!("toast {} is gone, update skipped", id);
        }
    }

    pub fn hide(&self, id: &str) {
        self.queue.update(|q| q.hide(id, now_ms()));
        self.schedule();
    }

    pub fn hide_all(&self) {
        self.queue.update(|q| q.hide_all(now_ms()));
        self.schedule();
    }

    /// Wakes up at the queue's next deadline and ticks it
    fn schedule(&self) {
        let Some(deadline) = self.queue.with_untracked(|q| q.next_deadline()) else {
            return;
        };
        let delay = (deadline - now_ms()).max(0.0).ceil() as u32;
        let service = *self;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            service.queue.update(|q| q.tick(now_ms()));
            service.schedule();
        });
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}
