//! Notification queue, independent of the DOM and of the clock
//!
//! Every operation takes the current time in milliseconds. The service layer
//! feeds it `Date.now()` and calls [`ToastQueue::tick`] at the deadline
//! returned by [`ToastQueue::next_deadline`].

/// Exit animation length; a hidden toast stays in the DOM this long
pub const HIDE_ANIMATION_MS: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// Auto-hide delay; 0 means the toast stays until updated or hidden
    pub fn default_duration_ms(&self) -> u32 {
        match self {
            ToastKind::Loading => 0,
            ToastKind::Success => 4000,
            ToastKind::Error => 6000,
            ToastKind::Warning => 5000,
            ToastKind::Info => 4000,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Loading => "toast-loading",
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Warning => "toast-warning",
            ToastKind::Info => "toast-info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Loading => "⏳",
            ToastKind::Success => "✅",
            ToastKind::Error => "❌",
            ToastKind::Warning => "⚠️",
            ToastKind::Info => "ℹ️",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    /// Explicit id; an active toast with the same id is replaced
    pub id: Option<String>,
    /// Overrides the kind's default auto-hide delay
    pub duration_ms: Option<u32>,
    /// Hides the close button
    pub not_closable: bool,
}

impl ToastOptions {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToastPatch {
    pub kind: Option<ToastKind>,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastPhase {
    Visible,
    /// Playing the exit animation, removed at `remove_at`
    Leaving { remove_at: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub title: String,
    pub body: String,
    pub auto_hide_delay_ms: u32,
    pub closable: bool,
    pub phase: ToastPhase,
    /// When the toast starts leaving on its own
    pub hide_at: Option<f64>,
}

impl ToastMessage {
    pub fn is_visible(&self) -> bool {
        self.phase == ToastPhase::Visible
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<ToastMessage>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a toast and returns its id. `generated_id` is used when the
    /// options carry none.
    pub fn show(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        body: impl Into<String>,
        options: ToastOptions,
        generated_id: String,
        now: f64,
    ) -> String {
        let id = options.id.unwrap_or(generated_id);
        // one element per id, even while the old one would still be animating out
        self.toasts.retain(|t| t.id != id);

        let delay = options
            .duration_ms
            .unwrap_or_else(|| kind.default_duration_ms());
        self.toasts.push(ToastMessage {
            id: id.clone(),
            kind,
            title: title.into(),
            body: body.into(),
            auto_hide_delay_ms: delay,
            closable: !options.not_closable,
            phase: ToastPhase::Visible,
            hide_at: deadline(now, delay),
        });
        id
    }

    /// Changes a visible toast in place. A new kind restarts auto-hide from
    /// `now` with that kind's default delay; turning into `Loading` makes it sticky.
    pub fn update(&mut self, id: &str, patch: ToastPatch, now: f64) -> bool {
        let Some(toast) = self
            .toasts
            .iter_mut()
            .find(|t| t.id == id && t.is_visible())
        else {
            return false;
        };

        if let Some(kind) = patch.kind {
            toast.kind = kind;
            toast.auto_hide_delay_ms = kind.default_duration_ms();
            toast.hide_at = deadline(now, toast.auto_hide_delay_ms);
        }
        if let Some(title) = patch.title {
            toast.title = title;
        }
        if let Some(body) = patch.body {
            toast.body = body;
        }
        true
    }

    pub fn hide(&mut self, id: &str, now: f64) {
        for toast in self.toasts.iter_mut().filter(|t| t.id == id) {
            if toast.is_visible() {
                toast.phase = ToastPhase::Leaving {
                    remove_at: now + HIDE_ANIMATION_MS,
                };
                toast.hide_at = None;
            }
        }
    }

    pub fn hide_all(&mut self, now: f64) {
        let ids: Vec<String> = self.visible().map(|t| t.id.clone()).collect();
        for id in ids {
            self.hide(&id, now);
        }
    }

    /// Starts exit animations that are due and drops finished ones
    pub fn tick(&mut self, now: f64) {
        let due: Vec<String> = self
            .toasts
            .iter()
            .filter(|t| t.is_visible() && t.hide_at.is_some_and(|at| at <= now))
            .map(|t| t.id.clone())
            .collect();
        for id in due {
            self.hide(&id, now);
        }
        self.toasts.retain(|t| match t.phase {
            ToastPhase::Visible => true,
            ToastPhase::Leaving { remove_at } => remove_at > now,
        });
    }

    /// Earliest pending auto-hide or removal
    pub fn next_deadline(&self) -> Option<f64> {
        self.toasts
            .iter()
            .filter_map(|t| match t.phase {
                ToastPhase::Visible => t.hide_at,
                ToastPhase::Leaving { remove_at } => Some(remove_at),
            })
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn get(&self, id: &str) -> Option<&ToastMessage> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Every toast still in the DOM, including those animating out
    pub fn all(&self) -> &[ToastMessage] {
        &self.toasts
    }

    pub fn visible(&self) -> impl Iterator<Item = &ToastMessage> {
        self.toasts.iter().filter(|t| t.is_visible())
    }
}

fn deadline(now: f64, delay_ms: u32) -> Option<f64> {
    (delay_ms > 0).then(|| now + f64::from(delay_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(queue: &mut ToastQueue, kind: ToastKind, options: ToastOptions, now: f64) -> String {
        queue.show(kind, "Title", "Body", options, format!("toast-{}", now), now)
    }

    #[test]
    fn test_loading_is_sticky_until_updated() {
        let mut queue = ToastQueue::new();
        let id = show(&mut queue, ToastKind::Loading, ToastOptions::with_id("export-1"), 0.0);
        assert_eq!(id, "export-1");

        queue.tick(60_000.0);
        assert_eq!(queue.visible().count(), 1);

        let patch = ToastPatch {
            kind: Some(ToastKind::Success),
            title: Some("Report created".to_string()),
            body: None,
        };
        assert!(queue.update(&id, patch, 60_000.0));

        let visible: Vec<_> = queue.visible().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind, ToastKind::Success);
        assert_eq!(visible[0].title, "Report created");
        assert_eq!(visible[0].body, "Body");

        queue.tick(63_999.0);
        assert_eq!(queue.visible().count(), 1);
        queue.tick(64_000.0);
        assert_eq!(queue.visible().count(), 0);
        assert_eq!(queue.all().len(), 1);
        queue.tick(64_000.0 + HIDE_ANIMATION_MS);
        assert!(queue.all().is_empty());
    }

    #[test]
    fn test_update_restarts_running_countdown() {
        let mut queue = ToastQueue::new();
        let id = show(&mut queue, ToastKind::Success, ToastOptions::with_id("save"), 0.0);
        assert_eq!(queue.next_deadline(), Some(4000.0));

        let patch = ToastPatch {
            kind: Some(ToastKind::Error),
            title: Some("Save failed".to_string()),
            body: None,
        };
        assert!(queue.update(&id, patch, 3000.0));
        assert_eq!(queue.next_deadline(), Some(9000.0));

        queue.tick(4000.0);
        assert_eq!(queue.visible().count(), 1);
        queue.tick(9000.0);
        assert_eq!(queue.visible().count(), 0);
    }

    #[test]
    fn test_text_only_update_keeps_deadline() {
        let mut queue = ToastQueue::new();
        let id = show(&mut queue, ToastKind::Info, ToastOptions::default(), 0.0);
        let patch = ToastPatch {
            kind: None,
            title: None,
            body: Some("Still uploading".to_string()),
        };
        assert!(queue.update(&id, patch, 2000.0));
        assert_eq!(queue.next_deadline(), Some(4000.0));
    }

    #[test]
    fn test_same_id_never_duplicates() {
        let mut queue = ToastQueue::new();
        show(&mut queue, ToastKind::Info, ToastOptions::with_id("net"), 0.0);
        queue.hide("net", 10.0);
        show(&mut queue, ToastKind::Warning, ToastOptions::with_id("net"), 20.0);
        show(&mut queue, ToastKind::Error, ToastOptions::with_id("net"), 30.0);

        assert_eq!(queue.all().iter().filter(|t| t.id == "net").count(), 1);
        assert_eq!(queue.get("net").map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn test_default_durations() {
        let mut queue = ToastQueue::new();
        let warning = show(&mut queue, ToastKind::Warning, ToastOptions::default(), 1000.0);
        let error = show(&mut queue, ToastKind::Error, ToastOptions::default(), 1001.0);
        assert_eq!(queue.get(&warning).and_then(|t| t.hide_at), Some(6000.0));
        assert_eq!(queue.get(&error).and_then(|t| t.hide_at), Some(7001.0));
        assert_eq!(queue.next_deadline(), Some(6000.0));
    }

    #[test]
    fn test_explicit_duration_and_hide_all() {
        let mut queue = ToastQueue::new();
        let options = ToastOptions {
            duration_ms: Some(0),
            ..ToastOptions::default()
        };
        let sticky = show(&mut queue, ToastKind::Success, options, 0.0);
        assert_eq!(queue.get(&sticky).and_then(|t| t.hide_at), None);

        show(&mut queue, ToastKind::Info, ToastOptions::default(), 1.0);
        queue.hide_all(100.0);
        assert_eq!(queue.visible().count(), 0);
        assert_eq!(queue.next_deadline(), Some(100.0 + HIDE_ANIMATION_MS));
    }

    #[test]
    fn test_update_of_hidden_toast_is_ignored() {
        let mut queue = ToastQueue::new();
        let id = show(&mut queue, ToastKind::Loading, ToastOptions::default(), 0.0);
        queue.hide(&id, 1.0);
        assert!(!queue.update(&id, ToastPatch::default(), 2.0));
        assert!(!queue.update("missing", ToastPatch::default(), 2.0));
    }
}
