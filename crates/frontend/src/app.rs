use crate::layout::global_context::AppGlobalContext;
use crate::pwa::PwaShell;
use crate::routes::routes::AppRoutes;
use crate::shared::toast::{ToastHost, ToastService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Branch directory and page-wide settings
    provide_context(AppGlobalContext::new());

    // Toasts are used by the data entry page, the exports and the installer
    provide_context(ToastService::new());

    view! {
        <AppRoutes />
        <PwaShell />
        <ToastHost />
    }
}
