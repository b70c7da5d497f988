//! User account administration (Admin only)
//!
//! Lists login accounts and lets an admin create accounts, delete them and
//! reset passwords. The signed-in admin's own row has no delete action.

use crate::auth::use_auth;
use crate::browser;
use crate::error::{ApiError, EmptyState, ErrorAlert, LoadingError};
use hrms_common::users::{CreateUserRequest, UserAccount};
use hrms_common::{Role, SubmitGate};
use leptos::*;

/// Order of the role dropdown; the first entry is the default for new accounts
const ROLE_CHOICES: [Role; 3] = [Role::Hr, Role::Management, Role::Admin];

#[component]
pub fn ManageUsers() -> impl IntoView {
    let auth = use_auth();
    let users = create_local_resource(|| (), move |_| async move { auth.client().list_users().await });
    let (show_create, set_show_create) = create_signal(false);
    let (action_error, set_action_error) = create_signal(None::<ApiError>);

    let delete_user = move |username: String| {
        if !browser::confirm(&format!("Are you sure you want to delete user '{}'?", username)) {
            return;
        }
        let client = auth.client();
        spawn_local(async move {
            match client.delete_user(&username).await {
                Ok(()) => {
                    browser::alert(&format!("User '{}' deleted successfully!", username));
                    users.refetch();
                }
                Err(e) => set_action_error.set(Some(e)),
            }
        });
    };

    let reset_password = move |username: String| {
        let Some(new_password) = browser::prompt(&format!("Enter new password for {}:", username)) else {
            return;
        };
        if new_password.is_empty() {
            return;
        }
        let client = auth.client();
        spawn_local(async move {
            match client.update_password(&username, &new_password).await {
                Ok(()) => browser::alert("Password updated successfully!"),
                Err(e) => set_action_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="manage-users">
            <div class="page-header">
                <div>
                    <h1>"Manage Users"</h1>
                    <p>"Create and manage system access accounts"</p>
                </div>
                <button class="btn btn-primary" on:click=move |_| set_show_create.update(|v| *v = !*v)>
                    "+ Create New User"
                </button>
            </div>

            <Show when=move || show_create.get()>
                <CreateUserForm
                    on_created=Callback::new(move |_| {
                        set_show_create.set(false);
                        users.refetch();
                    })
                    on_cancel=Callback::new(move |_| set_show_create.set(false))
                />
            </Show>

            {move || action_error.get().map(|e| view! {
                <ErrorAlert error=e on_dismiss=Callback::new(move |_| set_action_error.set(None))/>
            })}

            <div class="card">
                <h2>"Existing Accounts"</h2>
                <Suspense fallback=move || view! { <p>"Loading users..."</p> }>
                    {move || users.get().map(|result| match result {
                        Err(error) => view! {
                            <LoadingError error=error on_retry=Callback::new(move |_| users.refetch())/>
                        }
                        .into_view(),
                        Ok(list) if list.is_empty() => view! {
                            <EmptyState icon="👤" title="No users found.".to_string() description=String::new()/>
                        }
                        .into_view(),
                        Ok(list) => view! {
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>"Username"</th>
                                        <th>"Role"</th>
                                        <th>"Actions"</th>
                                        <th>"Password"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list.into_iter().map(|account| view! {
                                        <UserRow account=account on_delete=delete_user on_reset=reset_password/>
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }
                        .into_view(),
                    })}
                </Suspense>
            </div>

            <div class="card role-legend">
                <h2>"Roles"</h2>
                {ROLE_CHOICES.into_iter().map(|role| view! {
                    <p><strong>{role.as_str()}</strong>": "{role.description()}</p>
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn UserRow<D, R>(account: UserAccount, on_delete: D, on_reset: R) -> impl IntoView
where
    D: Fn(String) + Copy + 'static,
    R: Fn(String) + Copy + 'static,
{
    let auth = use_auth();
    let deletable = auth
        .identity()
        .map_or(false, |current| account.can_be_deleted_by(&current));
    let username = account.username;
    let for_delete = username.clone();
    let for_reset = username.clone();

    view! {
        <tr>
            <td>"👤 "{username}</td>
            <td><span class="role-badge">{account.role.as_str()}</span></td>
            <td>
                {if deletable {
                    view! {
                        <button class="btn-sm btn-danger" on:click=move |_| on_delete(for_delete.clone())>
                            "Delete"
                        </button>
                    }
                    .into_view()
                } else {
                    view! { <span class="muted">"(current user)"</span> }.into_view()
                }}
            </td>
            <td>
                <button class="btn-sm btn-secondary" on:click=move |_| on_reset(for_reset.clone())>
                    "Reset Password"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn CreateUserForm(on_created: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (role, set_role) = create_signal(ROLE_CHOICES[0]);
    let (submitting, set_submitting) = create_signal(false);
    let (error, set_error) = create_signal(None::<ApiError>);
    let gate = SubmitGate::new();

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let mut request = CreateUserRequest::new(username.get_untracked().trim(), password.get_untracked());
        request.role = role.get_untracked();
        if let Err(message) = request.validate() {
            browser::alert(message);
            return;
        }
        let Some(ticket) = gate.try_begin() else {
            return;
        };

        set_error.set(None);
        set_submitting.set(true);
        let client = auth.client();
        spawn_local(async move {
            let _ticket = ticket;
            let result = client.create_user(&request).await;
            set_submitting.set(false);
            match result {
                Ok(()) => {
                    browser::alert(&format!("User '{}' created successfully!", request.username));
                    set_username.set(String::new());
                    set_password.set(String::new());
                    set_role.set(ROLE_CHOICES[0]);
                    on_created.call(());
                }
                Err(e) => {
                    logging::warn!("failed to create user {}: {}", request.username, e.message);
                    set_error.set(Some(e));
                }
            }
        });
    };

    view! {
        <div class="card">
            <h2>"Create New User Account"</h2>
            <form on:submit=submit>
                <div class="form-grid">
                    <div class="form-group">
                        <label>"Username"</label>
                        <input
                            type="text"
                            required
                            placeholder="johndoe"
                            prop:value=username
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label>"Password"</label>
                        <input
                            type="password"
                            required
                            placeholder="••••••••"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label>"Role"</label>
                        <select on:change=move |ev| {
                            if let Ok(parsed) = event_target_value(&ev).parse::<Role>() {
                                set_role.set(parsed);
                            }
                        }>
                            {ROLE_CHOICES.into_iter().map(|r| view! {
                                <option value=r.as_str() selected=move || role.get() == r>{r.as_str()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                </div>

                {move || error.get().map(|e| view! { <ErrorAlert error=e/> })}

                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_cancel.call(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Creating..." } else { "Create Account" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
