use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::toast::use_toasts;
use crate::system::users::api;
use crate::system::users::validation::PasswordChangeForm;

/// Changes the signed-in admin's own password
#[component]
pub fn ChangePasswordModal(on_close: Callback<()>) -> impl IntoView {
    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let toasts = use_toasts();

    let form = move || PasswordChangeForm {
        current: current.get(),
        new: new_password.get(),
        confirm: confirm.get(),
    };
    let mismatch = move || form().mismatch();

    let on_save = move |_| {
        let snapshot = PasswordChangeForm {
            current: current.get_untracked(),
            new: new_password.get_untracked(),
            confirm: confirm.get_untracked(),
        };
        let request = match snapshot.to_request() {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::change_admin_password(&request).await {
                Ok(message) => {
                    toasts.success("Password changed", message);
                    on_close.run(());
                }
                Err(e) => {
                    log::error!("Failed to change password: {}", e);
                    set_error.set(Some(e.to_string()));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <ModalFrame on_close=on_close>
            <div class="modal-header">
                <h2 class="modal-title">"Change Password"</h2>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                    {icon("x")}
                </Button>
            </div>

            <div class="modal-body">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="form__group">
                    <Label>"Current Password *"</Label>
                    <Input value=current input_type=InputType::Password />
                </div>
                <div class="form__group">
                    <Label>"New Password *"</Label>
                    <Input value=new_password input_type=InputType::Password placeholder="At least 6 characters" />
                </div>
                <div class="form__group" class:form__group--invalid=mismatch>
                    <Label>"Confirm New Password *"</Label>
                    <Input value=confirm input_type=InputType::Password />
                    <Show when=mismatch>
                        <small class="form__error">"Passwords do not match"</small>
                    </Show>
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
                    {move || if saving.get() { "Changing..." } else { "Change Password" }}
                </Button>
            </div>
        </ModalFrame>
    }
}
