///! Role checks and the route guard decision

use crate::auth::{Identity, Role};
use crate::error::{AccessError, AuthorizationDenied};
use tracing::debug;

/// Entry point for unauthenticated visitors
pub const LOGIN_PATH: &str = "/login";

/// What a protected view should do for the current identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the guarded subtree
    Render,
    /// No identity: go to the login page, dropping the requested path
    RedirectToLogin,
    /// Identity present but lacking every required role: show a static
    /// notice in place of the subtree, no redirect
    AccessDenied,
}

/// `true` when `required` is empty, otherwise when an identity exists and
/// its role is one of `required`.
pub fn has_role(identity: Option<&Identity>, required: &[Role]) -> bool {
    if required.is_empty() {
        return true;
    }
    identity.map_or(false, |id| required.contains(&id.role()))
}

pub fn evaluate(identity: Option<&Identity>, required: &[Role]) -> GuardOutcome {
    match identity {
        None => GuardOutcome::RedirectToLogin,
        Some(id) if has_role(Some(id), required) => GuardOutcome::Render,
        Some(id) => {
            debug!(username = id.username(), role = %id.role(), ?required, "access denied");
            GuardOutcome::AccessDenied
        }
    }
}

/// Same decision as [`evaluate`], as a `Result` for callers that propagate
/// with `?`
pub fn authorize<'a>(
    identity: Option<&'a Identity>,
    required: &[Role],
) -> Result<&'a Identity, AccessError> {
    let id = identity.ok_or(AccessError::Unauthenticated)?;
    if has_role(Some(id), required) {
        Ok(id)
    } else {
        Err(AuthorizationDenied {
            role: id.role(),
            required: required.to_vec(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLE_SETS: &[&[Role]] = &[
        &[],
        &[Role::Admin],
        &[Role::Hr],
        &[Role::Management],
        &[Role::Admin, Role::Hr],
        &[Role::Hr, Role::Management],
        &[Role::Admin, Role::Hr, Role::Management],
    ];

    #[test]
    fn test_has_role_matches_membership_for_every_combination() {
        for role in Role::ALL {
            let identity = Identity::new("user", role);
            for required in ROLE_SETS {
                let expected = required.is_empty() || required.contains(&role);
                assert_eq!(
                    has_role(Some(&identity), required),
                    expected,
                    "role {role} against {required:?}"
                );
            }
        }
    }

    #[test]
    fn test_has_role_without_identity() {
        assert!(has_role(None, &[]));
        assert!(!has_role(None, &[Role::Admin]));
        assert!(!has_role(None, &Role::ALL));
    }

    #[test]
    fn test_no_identity_always_redirects() {
        for required in ROLE_SETS {
            assert_eq!(evaluate(None, required), GuardOutcome::RedirectToLogin);
        }
    }

    #[test]
    fn test_insufficient_role_is_denied_not_redirected() {
        let manager = Identity::new("john_mgr", Role::Management);
        assert_eq!(evaluate(Some(&manager), &[Role::Admin]), GuardOutcome::AccessDenied);
        assert_eq!(
            evaluate(Some(&manager), &[Role::Admin, Role::Hr]),
            GuardOutcome::AccessDenied
        );
    }

    #[test]
    fn test_any_identity_renders_unrestricted_view() {
        for role in Role::ALL {
            let identity = Identity::new("u", role);
            assert_eq!(evaluate(Some(&identity), &[]), GuardOutcome::Render);
        }
    }

    #[test]
    fn test_matching_role_renders() {
        let hr = Identity::new("hr1", Role::Hr);
        assert_eq!(evaluate(Some(&hr), &[Role::Admin, Role::Hr]), GuardOutcome::Render);
    }

    #[test]
    fn test_authorize_distinguishes_failures() {
        assert_eq!(authorize(None, &[]), Err(AccessError::Unauthenticated));

        let manager = Identity::new("john_mgr", Role::Management);
        match authorize(Some(&manager), &[Role::Admin]) {
            Err(AccessError::Denied(denied)) => {
                assert_eq!(denied.role, Role::Management);
                assert_eq!(denied.required, vec![Role::Admin]);
            }
            other => panic!("expected denial, got {other:?}"),
        }

        let admin = Identity::new("admin", Role::Admin);
        assert_eq!(authorize(Some(&admin), &[Role::Admin]), Ok(&admin));
    }
}
