use crate::auth::use_auth;
use hrms_common::nav::{visible_entries, SIDEBAR_ENTRIES};
use hrms_common::LOGIN_PATH;
use leptos::*;
use leptos_router::{use_navigate, NavigateOptions, Outlet, A};

/// Authenticated shell: header on top, sidebar on the left, the matched
/// child route in the main area
#[component]
pub fn Layout() -> impl IntoView {
    view! {
        <div class="app-shell">
            <Header/>
            <div class="app-body">
                <Sidebar/>
                <main class="main-content">
                    <Outlet/>
                </main>
            </div>
        </div>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let logout = move |_| {
        auth.logout();
        navigate(LOGIN_PATH, NavigateOptions { replace: true, ..Default::default() });
    };

    view! {
        <header class="top-nav">
            <div class="nav-brand">
                <h2>"HRMS"</h2>
            </div>
            <div class="nav-greeting">
                {move || auth.identity().map(|user| view! {
                    <span>"Welcome back, "<strong>{user.username().to_string()}</strong>"!"</span>
                    <span class="role-badge">{user.role().as_str()}</span>
                })}
            </div>
            <div class="nav-actions">
                <button class="btn btn-danger" title="Logout" on:click=logout>
                    "Logout"
                </button>
            </div>
        </header>
    }
}

/// Role-filtered navigation menu plus the current user's badge
#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();

    let entries = move || {
        let identity = auth.identity();
        visible_entries(SIDEBAR_ENTRIES, identity.as_ref())
            .into_iter()
            .copied()
            .collect::<Vec<_>>()
    };

    view! {
        <aside class="sidebar">
            <nav class="sidebar-nav">
                <For
                    each=entries
                    key=|entry| entry.path
                    children=|entry| view! {
                        <A href=entry.path class="sidebar-item" active_class="active">
                            <span class="sidebar-icon" title=entry.description>{entry.icon}</span>
                            <span class="sidebar-label">{entry.label}</span>
                        </A>
                    }
                />
            </nav>
            {move || auth.identity().map(|user| view! {
                <div class="sidebar-user">
                    <div class="avatar">{user.initial()}</div>
                    <div class="sidebar-user-info">
                        <p class="sidebar-username">{user.username().to_string()}</p>
                        <p class="role-badge">{user.role().as_str()}</p>
                    </div>
                </div>
            })}
        </aside>
    }
}
