use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_export_excel::{ExportExcel, ExportFilters, ExportKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::export_excel;
use super::outcome::ExportError;
use crate::shared::components::ui::{Button, Input};
use crate::shared::export::download_blob;
use crate::shared::icons::icon;
use crate::shared::toast::{use_toasts, ToastKind, ToastOptions, ToastPatch};

/// Admin dashboard: report filters and the two Excel downloads
#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let employee = RwSignal::new(String::new());
    let branch = RwSignal::new(String::new());
    let model = RwSignal::new(String::new());
    let date_from = RwSignal::new(String::new());
    let date_to = RwSignal::new(String::new());
    let exporting: RwSignal<Option<ExportKind>> = RwSignal::new(None);
    let toasts = use_toasts();

    let filters = move || {
        ExportFilters::from_inputs(
            &employee.get_untracked(),
            &branch.get_untracked(),
            &model.get_untracked(),
            &date_from.get_untracked(),
            &date_to.get_untracked(),
        )
    };

    let run_export = move |kind: ExportKind| {
        if exporting.get_untracked().is_some() {
            return;
        }
        let filters = filters();
        log::debug!("{}: starting {} export with {:?}", ExportExcel::full_name(), kind.slug(), filters);

        let toast_id = format!("export-{}", js_sys::Date::now() as u64);
        toasts.loading(
            "Exporting...",
            format!("Preparing the {}", kind.label()),
            ToastOptions::with_id(toast_id.clone()),
        );
        exporting.set(Some(kind));

        spawn_local(async move {
            let result = export_excel(kind, &filters).await.and_then(|download| {
                download_blob(&download.blob, &download.filename)
                    .map(|_| download.filename)
                    .map_err(ExportError::Browser)
            });
            match result {
                Ok(filename) => {
                    log::info!("Export saved as {}", filename);
                    toasts.update(
                        &toast_id,
                        ToastPatch {
                            kind: Some(ToastKind::Success),
                            title: Some("Export complete".to_string()),
                            body: Some(format!("Downloaded {}", filename)),
                        },
                    );
                }
                Err(e) => {
                    log::error!("Export failed: {}", e);
                    toasts.update(
                        &toast_id,
                        ToastPatch {
                            kind: Some(ToastKind::Error),
                            title: Some("Export failed".to_string()),
                            body: Some(e.to_string()),
                        },
                    );
                }
            }
            exporting.set(None);
        });
    };

    let clear = move |_: leptos::ev::MouseEvent| {
        for field in [employee, branch, model, date_from, date_to] {
            field.set(String::new());
        }
    };

    let busy = move |kind: ExportKind| Signal::derive(move || exporting.get() == Some(kind));
    let any_busy = Signal::derive(move || exporting.get().is_some());

    view! {
        <div class="page admin-dashboard">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("download")}
                    <h1 class="page__title">"Reports"</h1>
                </div>
                <p class="page__subtitle">{ExportExcel::description()}</p>
            </div>

            <div class="page__content">
                <div class="filter-panel export-filters">
                    <Input
                        label="Employee"
                        value=employee
                        on_input=Callback::new(move |v| employee.set(v))
                        id="filter_employee"
                    />
                    <Input
                        label="Branch"
                        value=branch
                        on_input=Callback::new(move |v| branch.set(v))
                        id="filter_branch"
                    />
                    <Input
                        label="Model"
                        value=model
                        on_input=Callback::new(move |v| model.set(v))
                        id="filter_model"
                    />
                    <Input
                        label="From"
                        input_type="date"
                        value=date_from
                        on_input=Callback::new(move |v| date_from.set(v))
                        id="filter_date_from"
                    />
                    <Input
                        label="To"
                        input_type="date"
                        value=date_to
                        on_input=Callback::new(move |v| date_to.set(v))
                        id="filter_date_to"
                    />
                </div>

                <div class="export-actions">
                    <Button
                        variant="primary"
                        busy=busy(ExportKind::Enhanced)
                        busy_text="Exporting..."
                        disabled=any_busy
                        on_click=Callback::new(move |_| run_export(ExportKind::Enhanced))
                    >
                        {icon("download")}
                        " Export Excel (with images)"
                    </Button>
                    <Button
                        variant="secondary"
                        busy=busy(ExportKind::Simple)
                        busy_text="Exporting..."
                        disabled=any_busy
                        on_click=Callback::new(move |_| run_export(ExportKind::Simple))
                    >
                        {icon("download")}
                        " Export Simple"
                    </Button>
                    <Button variant="ghost" on_click=Callback::new(clear)>
                        "Clear Filters"
                    </Button>
                </div>
            </div>
        </div>
    }
}
