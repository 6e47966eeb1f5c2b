use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::domain::a002_model_entry::ui::DataEntryPage;
use crate::layout::Shell;
use crate::system::users::ui::list::UserManagementPage;
use crate::usecases::u501_export_excel::AdminDashboardPage;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--not-found">
            <h1 class="page__title">"Page not found"</h1>
            <a href="/data_entry" rel="external">"Back to data entry"</a>
        </div>
    }
}

/// Pages served by the host application; the server renders each one and
/// the router only picks the component to mount
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=DataEntryPage />
                    <Route path=path!("/data_entry") view=DataEntryPage />
                    <Route path=path!("/user_management") view=UserManagementPage />
                    <Route path=path!("/admin_dashboard") view=AdminDashboardPage />
                </Routes>
            </Shell>
        </Router>
    }
}
