use leptos::prelude::*;

use super::installer::InstallDialog;
use super::register::PwaController;
use crate::shared::components::ui::Button;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::toast::use_toasts;

const INSTALL_TIPS: [&str; 4] = [
    "🚀 Faster app access",
    "📱 Works offline",
    "🔔 Instant notifications",
    "💾 Saves data usage",
];

/// Install button, install dialogs and the update banner.
/// Mounted once, under the toast provider.
#[component]
pub fn PwaShell() -> impl IntoView {
    let pwa = PwaController::start(use_toasts());
    let close = Callback::new(move |_: ()| pwa.close_dialog());

    let dialog = move || {
        pwa.state.with(|s| s.dialog).map(|d| match d {
            InstallDialog::Instructions(browser) => view! {
                <ModalFrame on_close=close modal_class="install-instructions">
                    <div class="modal-body">
                        <div class="instructions-icon">"💡"</div>
                        <h3 class="instructions-title">"How to Install App"</h3>
                        <p class="instructions-text">{browser.install_instructions()}</p>
                    </div>
                    <div class="modal-footer">
                        <Button on_click=Callback::new(move |_| close.run(()))>"Got it"</Button>
                    </div>
                </ModalFrame>
            }
            .into_any(),
            InstallDialog::Tips => view! {
                <ModalFrame on_close=close modal_class="install-tips">
                    <div class="modal-body">
                        <h3 class="tips-title">"Benefits of Installing App"</h3>
                        <ul class="tips-list">
                            {INSTALL_TIPS.iter().map(|tip| view! { <li>{*tip}</li> }).collect_view()}
                        </ul>
                    </div>
                    <div class="modal-footer">
                        <Button on_click=Callback::new(move |_| close.run(()))>"OK"</Button>
                    </div>
                </ModalFrame>
            }
            .into_any(),
        })
    };

    view! {
        <Show when=move || pwa.state.with(|s| s.button_visible && !s.installed)>
            <button type="button" class="pwa-install-btn show" on:click=move |_| pwa.install()>
                <div class="install-icon">{icon("download")}</div>
                <div class="install-text">
                    <div class="install-title">"Install App"</div>
                    <div class="install-subtitle">"For quick and easy access"</div>
                </div>
            </button>
        </Show>

        {dialog}

        <Show when=move || pwa.update_ready.get()>
            <div class="update-notification">
                <div class="update-content">
                    <span class="update-text">"🔄 New update available"</span>
                    <Button size="sm" on_click=Callback::new(move |_| pwa.apply_update())>
                        "Update now"
                    </Button>
                    <Button
                        size="sm"
                        variant="ghost"
                        on_click=Callback::new(move |_| pwa.dismiss_update())
                    >
                        "Later"
                    </Button>
                </div>
            </div>
        </Show>
    }
}
