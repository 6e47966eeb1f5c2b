use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::layout::global_context::use_app_context;
use crate::shared::components::ui::{Badge, BadgeTone};

/// Server-rendered pages, so every link is a full navigation
const NAV_ITEMS: [(&str, &str); 3] = [
    ("/data_entry", "Data Entry"),
    ("/admin_dashboard", "Reports"),
    ("/user_management", "Users"),
];

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();
    let location = use_location();

    let branch_count = move || ctx.branches.with(|d| d.len());

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <span class="header__title">"POP Materials"</span>
                <nav class="header__nav">
                    {NAV_ITEMS
                        .iter()
                        .map(|(href, label)| {
                            let href = *href;
                            let active = move || location.pathname.get() == href;
                            view! {
                                <a
                                    href=href
                                    rel="external"
                                    class="header__link"
                                    class:header__link--active=active
                                >
                                    {*label}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
            </div>
            <div class="header__actions">
                <Show when=move || { branch_count() > 0 }>
                    <Badge tone=BadgeTone::Primary title="Branches available on this device">
                        {move || format!("{} branches", branch_count())}
                    </Badge>
                </Show>
            </div>
        </header>
    }
}
