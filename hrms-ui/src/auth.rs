//! Session context shared by every component
//!
//! The [`AuthPolicy`] lives in a signal provided once at the root of the
//! app. Components read it through [`use_auth`]; nothing else touches
//! `localStorage`.

use crate::api::ApiClient;
use crate::storage::BrowserStorage;
use hrms_common::{AuthError, AuthPolicy, Authenticator, GuardOutcome, Identity, Role};
use leptos::*;

#[derive(Clone, Copy)]
pub struct AuthContext {
    policy: RwSignal<AuthPolicy<BrowserStorage>>,
}

impl AuthContext {
    pub fn identity(&self) -> Option<Identity> {
        self.policy.with(|p| p.current_identity().cloned())
    }

    pub fn has_role(&self, required: &[Role]) -> bool {
        self.policy.with(|p| p.has_role(required))
    }

    pub fn guard(&self, required: &[Role]) -> GuardOutcome {
        self.policy.with(|p| p.guard(required))
    }

    /// API client carrying the current bearer token. Read untracked so
    /// building a client inside an event handler does not subscribe to
    /// session changes.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.policy.with_untracked(|p| p.token().map(str::to_string)))
    }

    /// Validate credentials against the backend and start a session.
    /// A rejected login leaves the current session as it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let response = ApiClient::new(None).authenticate(username, password).await?;
        self.policy
            .try_update(|p| p.establish_for(username, response))
            .unwrap_or_else(|| Err(AuthError::Backend("session context was disposed".to_string())))
    }

    pub fn logout(&self) {
        self.policy.update(|p| p.logout());
    }
}

/// Restore any persisted session and make it available to descendants
pub fn provide_auth() -> AuthContext {
    let policy = AuthPolicy::restore(BrowserStorage::local());
    if let Some(identity) = policy.current_identity() {
        logging::log!("restored session for {} ({})", identity.username(), identity.role());
    }
    let ctx = AuthContext {
        policy: create_rw_signal(policy),
    };
    provide_context(ctx);
    ctx
}

/// Must be called below the component that ran [`provide_auth`]
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
