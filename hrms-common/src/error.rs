///! Error types for the session and authorization layer

use crate::auth::Role;
use thiserror::Error;

/// Failures while establishing or restoring a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Persistent storage could not be read or written. Callers treat this
    /// as "not logged in", never as a fatal error.
    #[error("session storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("authentication service error: {0}")]
    Backend(String),
}

/// Errors raised by a [`SessionStore`](crate::session::SessionStore) backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("failed to access key '{key}': {message}")]
    Access { key: String, message: String },

    #[error("failed to encode session entry: {0}")]
    Encoding(String),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::StorageUnavailable(err.to_string())
    }
}

/// An authenticated identity lacks every role a resource requires
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("access denied: role {role} is not one of [{}]", join_roles(.required))]
pub struct AuthorizationDenied {
    pub role: Role,
    pub required: Vec<Role>,
}

/// Outcome of a failed access check, keeping "who are you" apart from
/// "you may not"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("not logged in")]
    Unauthenticated,

    #[error(transparent)]
    Denied(#[from] AuthorizationDenied),
}

/// Role name not recognized when parsing user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}' (expected Admin, HR or Management)")]
pub struct UnknownRole(pub String);

fn join_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_message_lists_required_roles() {
        let err = AuthorizationDenied {
            role: Role::Management,
            required: vec![Role::Admin, Role::Hr],
        };
        assert_eq!(
            err.to_string(),
            "access denied: role Management is not one of [Admin, HR]"
        );
    }

    #[test]
    fn test_storage_error_maps_to_storage_unavailable() {
        let err: AuthError = StorageError::Unavailable("quota exceeded".to_string()).into();
        assert!(matches!(err, AuthError::StorageUnavailable(msg) if msg.contains("quota exceeded")));
    }
}
