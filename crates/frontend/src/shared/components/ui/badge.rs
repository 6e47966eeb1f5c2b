use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeTone {
    Primary,
    Success,
    Warning,
    #[default]
    Neutral,
}

impl BadgeTone {
    fn css_class(self) -> &'static str {
        match self {
            BadgeTone::Primary => "badge--primary",
            BadgeTone::Success => "badge--success",
            BadgeTone::Warning => "badge--warning",
            BadgeTone::Neutral => "badge--neutral",
        }
    }
}

/// Small pill next to a title, e.g. the number of known branches
#[component]
pub fn Badge(
    #[prop(optional)]
    tone: BadgeTone,
    #[prop(optional, into)]
    title: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <span class=format!("badge {}", tone.css_class()) title=move || title.get()>
            {children()}
        </span>
    }
}
