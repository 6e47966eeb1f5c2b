mod state;

use contracts::system::users::{AdminUser, ManageUserRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::toast::use_toasts;
use crate::system::users::api;
use crate::system::users::host_data::read_users;
use crate::system::users::ui::branches::UserBranchesModal;
use crate::system::users::ui::details::UserModal;
use crate::system::users::ui::password::ChangePasswordModal;
use crate::system::users::ui::{confirm, reload_page_later};
use state::create_state;

/// Which dialog is open over the table
#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Create,
    Edit(AdminUser),
    Branches(AdminUser),
    Password,
}

#[component]
pub fn UserManagementPage() -> impl IntoView {
    let state = create_state();
    let (error, set_error) = signal::<Option<String>>(None);
    let dialog: RwSignal<Option<Dialog>> = RwSignal::new(None);
    let deleting: RwSignal<Option<i64>> = RwSignal::new(None);
    let search_signal = RwSignal::new(String::new());
    let toasts = use_toasts();

    match read_users() {
        Ok(users) => {
            log::info!("Loaded {} users from the page", users.len());
            state.update(|s| {
                s.all = users;
                s.is_loaded = true;
            });
        }
        Err(e) => {
            log::error!("{}", e);
            set_error.set(Some(e));
        }
    }

    Effect::new(move |_| {
        let query = search_signal.get();
        state.update(|s| s.search_query = query);
    });

    let delete_user = move |user: AdminUser| {
        if !confirm(&format!("Are you sure you want to delete user \"{}\"?", user.name)) {
            return;
        }
        deleting.set(Some(user.id));
        set_error.set(None);
        spawn_local(async move {
            match api::manage_user(&ManageUserRequest::Delete { id: user.id }).await {
                Ok(message) => {
                    toasts.success("User deleted", message);
                    reload_page_later();
                }
                Err(e) => {
                    log::error!("Failed to delete user {}: {}", user.id, e);
                    set_error.set(Some(e.to_string()));
                    deleting.set(None);
                }
            }
        });
    };

    let close_dialog = Callback::new(move |_| dialog.set(None));
    let branches_changed = Callback::new(move |(user_id, names): (i64, Vec<String>)| {
        state.update(|s| {
            s.set_branches(user_id, names);
        });
    });
    let saved = Callback::new(move |message: String| {
        dialog.set(None);
        toasts.success("Saved", message);
        reload_page_later();
    });

    view! {
        <div class="page user-management">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("users")}
                    <h1 class="page__title">"User Management"</h1>
                    <Badge>
                        {move || state.with(|s| s.all.len()).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| dialog.set(Some(Dialog::Create))
                    >
                        {icon("plus")}
                        " Add User"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| dialog.set(Some(Dialog::Password))
                    >
                        {icon("key")}
                        " Change Password"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div style="flex: 1; max-width: 320px;">
                            <Input
                                value=search_signal
                                placeholder="Name, full name or company code..."
                            />
                        </div>
                    </Flex>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=140.0>"Name"</TableHeaderCell>
                                <TableHeaderCell min_width=160.0>"Full Name"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Company Code"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Role"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Branches"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.with(|s| s.visible())
                                key=|u| (u.id, u.branches.clone())
                                children=move |user| {
                                    let user_id = user.id;
                                    let for_edit = user.clone();
                                    let for_branches = user.clone();
                                    let for_delete = user.clone();
                                    let branches = if user.branches.is_empty() {
                                        "-".to_string()
                                    } else {
                                        user.branches.join(", ")
                                    };
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{user.name.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {user.full_name.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{user.company_code.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if user.is_admin {
                                                        view! { <span class="badge badge--warning">"Admin"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--neutral">"User"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{branches}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| dialog.set(Some(Dialog::Edit(for_edit.clone())))
                                                        attr:title="Edit user"
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| dialog.set(Some(Dialog::Branches(for_branches.clone())))
                                                        attr:title="Manage branches"
                                                    >
                                                        {icon("store")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| delete_user(for_delete.clone())
                                                        disabled=Signal::derive(move || deleting.get() == Some(user_id))
                                                        attr:title="Delete user"
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                </Flex>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                {move || dialog.get().map(|d| match d {
                    Dialog::Create => view! {
                        <UserModal user=None on_close=close_dialog on_saved=saved />
                    }.into_any(),
                    Dialog::Edit(user) => view! {
                        <UserModal user=Some(user) on_close=close_dialog on_saved=saved />
                    }.into_any(),
                    Dialog::Branches(user) => view! {
                        <UserBranchesModal user=user on_close=close_dialog on_changed=branches_changed />
                    }.into_any(),
                    Dialog::Password => view! {
                        <ChangePasswordModal on_close=close_dialog />
                    }.into_any(),
                })}
            </div>
        </div>
    }
}
