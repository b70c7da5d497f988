use crate::auth::use_auth;
use hrms_common::{GuardOutcome, Role, LOGIN_PATH};
use leptos::*;
use leptos_router::{NavigateOptions, Redirect};

/// Renders `children` only for an identity holding one of `roles` (any
/// identity when `roles` is empty). Visitors without a session are sent to
/// the login page; identities lacking the role get an access-denied notice
/// in place, with no redirect.
#[component]
pub fn ProtectedRoute(
    #[prop(optional)]
    roles: &'static [Role],
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();

    move || match auth.guard(roles) {
        GuardOutcome::Render => children().into_view(),
        GuardOutcome::RedirectToLogin => {
            let options = NavigateOptions {
                replace: true,
                ..Default::default()
            };
            view! { <Redirect path=LOGIN_PATH options=options/> }.into_view()
        }
        GuardOutcome::AccessDenied => view! { <AccessDenied/> }.into_view(),
    }
}

#[component]
pub fn AccessDenied() -> impl IntoView {
    view! {
        <div class="access-denied">
            <div class="access-denied-card">
                <h1>"Access Denied"</h1>
                <p>"You don't have permission to view this page."</p>
            </div>
        </div>
    }
}
