use crate::auth::use_auth;
use hrms_common::routes;
use hrms_common::{AuthError, SubmitGate};
use leptos::*;
use leptos_router::{use_navigate, NavigateOptions};

#[component]
pub fn Login() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);
    let gate = SubmitGate::new();

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(ticket) = gate.try_begin() else {
            return;
        };
        set_error.set(None);
        set_submitting.set(true);

        let user = username.get_untracked();
        let pass = password.get_untracked();
        let navigate = navigate.clone();
        spawn_local(async move {
            let _ticket = ticket;
            let result = auth.login(user.trim(), &pass).await;
            set_submitting.set(false);
            match result {
                Ok(identity) => {
                    logging::log!("logged in as {} ({})", identity.username(), identity.role());
                    navigate(routes::DASHBOARD, NavigateOptions { replace: true, ..Default::default() });
                }
                Err(AuthError::InvalidCredentials) => {
                    set_error.set(Some("Invalid username or password".to_string()));
                }
                Err(e) => {
                    logging::warn!("login failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Welcome Back"</h1>
                <p class="tagline">"Sign in to continue to HRMS"</p>

                <form on:submit=submit>
                    <div class="form-group">
                        <label>"Username"</label>
                        <input
                            type="text"
                            required
                            placeholder="Enter your username"
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            prop:value=username
                        />
                    </div>

                    <div class="form-group">
                        <label>"Password"</label>
                        <input
                            type="password"
                            required
                            placeholder="Enter your password"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                        />
                    </div>

                    {move || error.get().map(|message| view! {
                        <div class="alert alert-error">{message}</div>
                    })}

                    <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
