//! Auth policy: the single source of truth for who is logged in
//!
//! [`AuthPolicy`] owns the in-memory identity and mirrors it into a
//! [`SessionStore`]. Login and logout are the only transitions that touch
//! persisted state, and each one leaves memory and storage in agreement
//! before returning.

use crate::auth::{Identity, LoginResponse, Role};
use crate::error::{AccessError, AuthError};
use crate::guard::{self, GuardOutcome};
use crate::session::{self, SessionStore, IDENTITY_KEY, TOKEN_KEY};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// External service that validates credentials and issues identities
#[async_trait(?Send)]
pub trait Authenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError>;
}

pub struct AuthPolicy<S> {
    store: S,
    identity: Option<Identity>,
    token: Option<String>,
}

impl<S: SessionStore> AuthPolicy<S> {
    /// Build the policy from whatever a previous run persisted. Missing,
    /// corrupt or unreadable entries all yield an unauthenticated policy.
    pub fn restore(store: S) -> Self {
        let identity = match store.read(IDENTITY_KEY) {
            Ok(Some(raw)) => session::decode_identity(&raw),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "session storage unreadable, starting logged out");
                None
            }
        };

        let token = match identity {
            Some(_) => store.read(TOKEN_KEY).unwrap_or_else(|e| {
                warn!(error = %e, "failed to read persisted token");
                None
            }),
            None => None,
        };

        if let Some(id) = &identity {
            debug!(username = id.username(), role = %id.role(), "restored session");
        }

        Self { store, identity, token }
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Bearer token for API requests, if the authenticator issued one
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn has_role(&self, required: &[Role]) -> bool {
        guard::has_role(self.identity.as_ref(), required)
    }

    pub fn guard(&self, required: &[Role]) -> GuardOutcome {
        guard::evaluate(self.identity.as_ref(), required)
    }

    pub fn authorize(&self, required: &[Role]) -> Result<&Identity, AccessError> {
        guard::authorize(self.identity.as_ref(), required)
    }

    /// Validate credentials with `authenticator` and start a session.
    ///
    /// A rejected login leaves any existing session untouched.
    pub async fn login<A>(&mut self, authenticator: &A, username: &str, password: &str) -> Result<Identity, AuthError>
    where
        A: Authenticator + ?Sized,
    {
        let response = authenticator.authenticate(username, password).await?;
        self.establish_for(username, response)
    }

    /// Start a session for a login submitted as `submitted`. The username in
    /// `response` is kept even when it differs from what was typed.
    pub fn establish_for(&mut self, submitted: &str, response: LoginResponse) -> Result<Identity, AuthError> {
        if response.user.username() != submitted {
            warn!(
                submitted,
                issued = response.user.username(),
                "authenticator issued a different username"
            );
        }
        self.establish(response)
    }

    /// Start a session from an authenticator response.
    ///
    /// Any previous session is replaced. If storage rejects the write the
    /// policy ends up logged out with nothing persisted.
    pub fn establish(&mut self, response: LoginResponse) -> Result<Identity, AuthError> {
        let LoginResponse { user, token } = response;
        let encoded = session::encode_identity(&user)?;

        self.identity = None;
        self.token = None;
        self.clear_persisted();

        if let Err(e) = self.persist(&encoded, token.as_deref()) {
            warn!(error = %e, username = user.username(), "failed to persist session");
            self.clear_persisted();
            return Err(e.into());
        }

        info!(username = user.username(), role = %user.role(), "session established");
        self.identity = Some(user.clone());
        self.token = token;
        Ok(user)
    }

    /// End the session. Safe to call when already logged out.
    pub fn logout(&mut self) {
        self.token = None;
        if let Some(previous) = self.identity.take() {
            info!(username = previous.username(), "session ended");
        }
        self.clear_persisted();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, identity: &str, token: Option<&str>) -> Result<(), crate::error::StorageError> {
        self.store.write(IDENTITY_KEY, identity)?;
        if let Some(token) = token {
            self.store.write(TOKEN_KEY, token)?;
        }
        Ok(())
    }

    fn clear_persisted(&mut self) {
        for key in [IDENTITY_KEY, TOKEN_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "failed to clear persisted session entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::session::MemoryStore;

    /// Accepts `password == username` and assigns roles from a fixed table
    struct StaticAuthenticator;

    #[async_trait(?Send)]
    impl Authenticator for StaticAuthenticator {
        async fn authenticate(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
            let role = match username {
                "admin" => Role::Admin,
                "hr1" => Role::Hr,
                "john_mgr" => Role::Management,
                _ => return Err(AuthError::InvalidCredentials),
            };
            if password != username {
                return Err(AuthError::InvalidCredentials);
            }
            Ok(LoginResponse {
                user: Identity::new(username, role),
                token: Some(format!("token-{username}")),
            })
        }
    }

    /// Reads work, every write fails
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl SessionStore for ReadOnlyStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.read(key)
        }

        fn write(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Access {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            })
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    /// Nothing works
    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("private browsing".to_string()))
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("private browsing".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("private browsing".to_string()))
        }
    }

    #[tokio::test]
    async fn test_login_sets_memory_and_storage() {
        let mut policy = AuthPolicy::restore(MemoryStore::new());
        let identity = policy.login(&StaticAuthenticator, "hr1", "hr1").await.unwrap();

        assert_eq!(identity.username(), "hr1");
        assert_eq!(policy.current_identity(), Some(&identity));
        assert_eq!(policy.token(), Some("token-hr1"));
        assert_eq!(
            policy.store().get(IDENTITY_KEY),
            Some(r#"{"username":"hr1","role":"HR"}"#)
        );
        assert_eq!(policy.store().get(TOKEN_KEY), Some("token-hr1"));
    }

    #[tokio::test]
    async fn test_invalid_credentials_write_nothing() {
        let mut policy = AuthPolicy::restore(MemoryStore::new());
        let err = policy.login(&StaticAuthenticator, "admin", "wrong").await.unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(policy.current_identity().is_none());
        assert!(policy.store().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_existing_session() {
        let mut policy = AuthPolicy::restore(MemoryStore::new());
        policy.login(&StaticAuthenticator, "admin", "admin").await.unwrap();
        let _ = policy.login(&StaticAuthenticator, "hr1", "nope").await;

        assert_eq!(policy.current_identity().map(|i| i.username()), Some("admin"));
        assert_eq!(policy.store().get(TOKEN_KEY), Some("token-admin"));
    }

    #[tokio::test]
    async fn test_second_login_replaces_session() {
        let mut policy = AuthPolicy::restore(MemoryStore::new());
        policy.login(&StaticAuthenticator, "admin", "admin").await.unwrap();
        policy.establish(LoginResponse {
            user: Identity::new("hr1", Role::Hr),
            token: None,
        })
        .unwrap();

        assert_eq!(policy.current_identity().map(|i| i.role()), Some(Role::Hr));
        assert_eq!(policy.token(), None);
        // the old token must not leak into the new session
        assert_eq!(policy.store().get(TOKEN_KEY), None);
    }

    #[test]
    fn test_logout_clears_everything_and_is_idempotent() {
        let store = MemoryStore::new()
            .with_entry(IDENTITY_KEY, r#"{"username":"admin","role":"Admin"}"#)
            .with_entry(TOKEN_KEY, "abc");
        let mut policy = AuthPolicy::restore(store);
        assert!(policy.is_authenticated());

        policy.logout();
        assert!(policy.current_identity().is_none());
        assert!(policy.token().is_none());
        assert!(policy.store().is_empty());

        policy.logout();
        assert!(policy.current_identity().is_none());
    }

    #[test]
    fn test_restore_ignores_corrupt_entry() {
        let store = MemoryStore::new()
            .with_entry(IDENTITY_KEY, "{\"username\":")
            .with_entry(TOKEN_KEY, "abc");
        let policy = AuthPolicy::restore(store);

        assert!(policy.current_identity().is_none());
        assert!(policy.token().is_none());
    }

    #[test]
    fn test_restore_with_unavailable_storage_is_logged_out() {
        let policy = AuthPolicy::restore(BrokenStore);
        assert!(!policy.is_authenticated());
        assert_eq!(policy.guard(&[]), GuardOutcome::RedirectToLogin);
    }

    #[test]
    fn test_logout_with_unavailable_storage_does_not_panic() {
        let mut policy = AuthPolicy::restore(BrokenStore);
        policy.logout();
        assert!(!policy.is_authenticated());
    }

    #[tokio::test]
    async fn test_storage_failure_on_login_fails_soft() {
        let mut policy = AuthPolicy::restore(ReadOnlyStore::default());
        let err = policy.login(&StaticAuthenticator, "admin", "admin").await.unwrap_err();

        assert!(matches!(err, AuthError::StorageUnavailable(_)));
        assert!(policy.current_identity().is_none());
        assert!(policy.token().is_none());
    }

    /// Normalizes usernames to lowercase before checking them
    struct CaseFoldingAuthenticator;

    #[async_trait(?Send)]
    impl Authenticator for CaseFoldingAuthenticator {
        async fn authenticate(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
            let canonical = username.to_lowercase();
            StaticAuthenticator.authenticate(&canonical, &password.to_lowercase()).await
        }
    }

    #[tokio::test]
    async fn test_issued_username_wins_over_submitted() {
        let mut policy = AuthPolicy::restore(MemoryStore::new());
        let identity = policy.login(&CaseFoldingAuthenticator, "HR1", "hr1").await.unwrap();

        assert_eq!(identity.username(), "hr1");
        assert_eq!(policy.current_identity().map(|i| i.username()), Some("hr1"));
        assert_eq!(
            policy.store().get(IDENTITY_KEY),
            Some(r#"{"username":"hr1","role":"HR"}"#)
        );
    }

    #[test]
    fn test_establish_for_matching_username() {
        let mut policy = AuthPolicy::restore(MemoryStore::new());
        let identity = policy
            .establish_for(
                "admin",
                LoginResponse {
                    user: Identity::new("admin", Role::Admin),
                    token: None,
                },
            )
            .unwrap();
        assert_eq!(identity.role(), Role::Admin);
    }

    #[tokio::test]
    async fn test_policy_role_checks() {
        let mut policy = AuthPolicy::restore(MemoryStore::new());
        assert!(policy.has_role(&[]));
        assert!(!policy.has_role(&[Role::Admin]));

        policy.login(&StaticAuthenticator, "john_mgr", "john_mgr").await.unwrap();
        assert!(policy.has_role(&[Role::Management]));
        assert_eq!(policy.guard(&[Role::Admin]), GuardOutcome::AccessDenied);
        assert!(matches!(policy.authorize(&[Role::Admin]), Err(AccessError::Denied(_))));
    }
}
