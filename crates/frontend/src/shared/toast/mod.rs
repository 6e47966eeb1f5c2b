pub mod queue;
pub mod service;
pub mod view;

pub use queue::{ToastKind, ToastOptions, ToastPatch};
pub use service::{use_toasts, ToastService};
pub use view::ToastHost;
