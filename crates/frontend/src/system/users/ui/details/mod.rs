use contracts::system::users::AdminUser;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::system::users::api;
use crate::system::users::validation::UserForm;

/// Add (`user: None`) or edit dialog
#[component]
pub fn UserModal(
    user: Option<AdminUser>,
    on_close: Callback<()>,
    /// Receives the server message
    on_saved: Callback<String>,
) -> impl IntoView {
    let initial = user.as_ref().map(UserForm::from_user).unwrap_or_default();
    let is_edit = initial.is_edit();
    let id = initial.id;

    let name = RwSignal::new(initial.name);
    let full_name = RwSignal::new(initial.full_name);
    let company_code = RwSignal::new(initial.company_code);
    let password = RwSignal::new(String::new());
    let is_admin = RwSignal::new(initial.is_admin);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        let form = UserForm {
            id,
            name: name.get_untracked(),
            full_name: full_name.get_untracked(),
            company_code: company_code.get_untracked(),
            password: password.get_untracked(),
            is_admin: is_admin.get_untracked(),
        };
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::manage_user(&request).await {
                Ok(message) => on_saved.run(message),
                Err(e) => {
                    log::error!("Failed to save user: {}", e);
                    set_error.set(Some(e.to_string()));
                    set_saving.set(false);
                }
            }
        });
    };

    let title = match &user {
        Some(u) => format!("Edit User: {}", u.name),
        None => "Add User".to_string(),
    };
    let password_hint = if is_edit {
        "Leave empty to keep the current password"
    } else {
        "At least 6 characters"
    };

    view! {
        <ModalFrame on_close=on_close>
            <div class="modal-header">
                <h2 class="modal-title">{title}</h2>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                    {icon("x")}
                </Button>
            </div>

            <div class="modal-body">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="form__group">
                    <Label>"Name *"</Label>
                    <Input value=name disabled=Signal::derive(move || saving.get()) />
                </div>

                <div class="form__group">
                    <Label>"Full Name"</Label>
                    <Input value=full_name disabled=Signal::derive(move || saving.get()) />
                </div>

                <div class="form__group">
                    <Label>"Company Code *"</Label>
                    <Input value=company_code disabled=Signal::derive(move || saving.get()) />
                </div>

                <div class="form__group">
                    <Label>{if is_edit { "Password" } else { "Password *" }}</Label>
                    <Input
                        value=password
                        input_type=InputType::Password
                        placeholder=password_hint
                        disabled=Signal::derive(move || saving.get())
                    />
                </div>

                <div class="form__group">
                    <Checkbox checked=is_admin label="Administrator" />
                </div>
            </div>

            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=Signal::derive(move || saving.get())
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=on_save
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </ModalFrame>
    }
}
