mod rows;

use contracts::system::users::{AdminUser, ManageUserBranchesRequest, UserBranch};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::toast::use_toasts;
use crate::system::users::api;
use crate::system::users::error_map::friendly_branch_error;
use crate::system::users::ui::confirm;
use crate::system::users::validation::{branch_batch, branch_entry};
use rows::{BatchRows, FormReset};

/// Branches assigned to one user: list, add one, add several, remove
#[component]
pub fn UserBranchesModal(
    user: AdminUser,
    on_close: Callback<()>,
    /// Receives the user's id and branch names after every change
    on_changed: Callback<(i64, Vec<String>)>,
) -> impl IntoView {
    let user_id = user.id;
    let branches: RwSignal<Vec<UserBranch>> = RwSignal::new(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let busy = RwSignal::new(false);
    let new_name = RwSignal::new(String::new());
    let new_code = RwSignal::new(String::new());
    let batch = RwSignal::new(BatchRows::new());
    let batch_open = RwSignal::new(false);
    let toasts = use_toasts();

    let load = move |changed: bool| {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_user_branches(user_id).await {
                Ok(list) => {
                    if changed {
                        let names = list.iter().map(|b| b.branch_name.clone()).collect();
                        on_changed.run((user_id, names));
                    }
                    branches.set(list);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load branches of user {}: {}", user_id, e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };
    load(false);

    // Runs a branch mutation; the form inputs are only reset once it succeeded
    let submit = move |request: ManageUserBranchesRequest| {
        busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::manage_user_branches(&request).await;
            match FormReset::after(&request, &result) {
                FormReset::SingleInputs => {
                    new_name.set(String::new());
                    new_code.set(String::new());
                }
                FormReset::BatchForm => {
                    batch.set(BatchRows::new());
                    batch_open.set(false);
                }
                FormReset::Nothing => {}
            }
            match result {
                Ok(message) => {
                    toasts.success("Branches updated", message);
                    load(true);
                }
                Err(e) => {
                    log::error!("Branch update failed: {}", e);
                    set_error.set(Some(friendly_branch_error(&e.to_string())));
                }
            }
            busy.set(false);
        });
    };

    let add_one = move |_| match branch_entry(&new_name.get_untracked(), &new_code.get_untracked()) {
        Ok(branch) => submit(ManageUserBranchesRequest::AddBranch {
            user_id,
            branch_name: branch.name,
            branch_code: branch.code,
        }),
        Err(e) => set_error.set(Some(e.to_string())),
    };

    let add_many = move |_| match branch_batch(&batch.with_untracked(|b| b.pairs())) {
        Ok(list) => submit(ManageUserBranchesRequest::AddMultipleBranches {
            user_id,
            branches: list,
        }),
        Err(e) => set_error.set(Some(e.to_string())),
    };

    let remove = move |branch: UserBranch| {
        if !confirm(&format!("Remove branch \"{}\" from this user?", branch.branch_name)) {
            return;
        }
        submit(ManageUserBranchesRequest::RemoveBranch {
            user_id,
            branch_id: branch.id,
        });
    };

    let busy_signal = Signal::derive(move || busy.get());

    view! {
        <ModalFrame on_close=on_close modal_class="user-branches">
            <div class="modal-header">
                <h2 class="modal-title">{format!("Branches: {}", user.name)}</h2>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                    {icon("x")}
                </Button>
            </div>

            <div class="modal-body">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="form__hint">"Loading branches..."</p> }
                >
                    <Show
                        when=move || branches.with(|b| !b.is_empty())
                        fallback=|| view! { <p class="form__hint">"No branches assigned yet."</p> }
                    >
                        <ul class="user-branches__list">
                            <For
                                each=move || branches.get()
                                key=|b| b.id
                                children=move |branch| {
                                    let code = branch.shop_code().unwrap_or("No Code").to_string();
                                    let for_remove = branch.clone();
                                    view! {
                                        <li class="user-branches__item">
                                            {icon("store")}
                                            <span class="user-branches__name">{branch.branch_name.clone()}</span>
                                            <span class="badge badge--neutral">{code}</span>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| remove(for_remove.clone())
                                                disabled=busy_signal
                                                attr:title="Remove branch"
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </Show>

                <h3 class="user-branches__section">"Add Branch"</h3>
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div style="flex: 2;">
                        <Input value=new_name placeholder="Branch name" />
                    </div>
                    <div style="flex: 1;">
                        <Input value=new_code placeholder="Shop code" />
                    </div>
                    <Button appearance=ButtonAppearance::Primary on_click=add_one disabled=busy_signal>
                        {icon("plus")}
                        {move || if busy.get() { " Adding..." } else { " Add" }}
                    </Button>
                </Flex>

                <Show
                    when=move || batch_open.get()
                    fallback=move || view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| batch_open.set(true)
                        >
                            "Add Multiple Branches"
                        </Button>
                    }
                >
                    <h3 class="user-branches__section">"Add Multiple Branches"</h3>
                    <For
                        each=move || batch.with(|b| b.rows().to_vec())
                        key=|row| row.key
                        children=move |row| {
                            let key = row.key;
                            view! {
                                <div class="user-branches__batch-row">
                                    <input
                                        class="form__input"
                                        placeholder="Branch name"
                                        prop:value=row.name.clone()
                                        on:input=move |ev| batch.update(|b| b.set_name(key, event_target_value(&ev)))
                                    />
                                    <input
                                        class="form__input"
                                        placeholder="Shop code"
                                        prop:value=row.code.clone()
                                        on:input=move |ev| batch.update(|b| b.set_code(key, event_target_value(&ev)))
                                    />
                                    <Show when=move || batch.with(|b| b.can_remove())>
                                        <button
                                            type="button"
                                            class="button button--ghost button--small"
                                            title="Remove row"
                                            on:click=move |_| batch.update(|b| b.remove(key))
                                        >
                                            {icon("x")}
                                        </button>
                                    </Show>
                                </div>
                            }
                        }
                    />
                    <Flex gap=FlexGap::Small>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| batch.update(|b| b.add())
                        >
                            {icon("plus")}
                            " Add Row"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=add_many disabled=busy_signal>
                            {move || if busy.get() { "Saving..." } else { "Save All" }}
                        </Button>
                    </Flex>
                </Show>
            </div>

            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
            </div>
        </ModalFrame>
    }
}
