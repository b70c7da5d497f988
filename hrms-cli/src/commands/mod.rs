pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod user;

use hrms_common::routes::required_roles;
use hrms_common::{AuthPolicy, Identity, SessionStore};
use tracing::debug;

/// Check the current session against the roles `route` requires in the web
/// UI. The returned error keeps "not logged in" and "access denied" apart so
/// `main` can report them differently.
pub fn authorize_route<'a, S: SessionStore>(policy: &'a AuthPolicy<S>, route: &str) -> anyhow::Result<&'a Identity> {
    let required = required_roles(route).unwrap_or_default();
    let identity = policy.authorize(required).map_err(anyhow::Error::from)?;
    debug!(route, username = identity.username(), "route authorized");
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrms_common::routes::{ADD_EMPLOYEE, DASHBOARD, MANAGE_USERS};
    use hrms_common::{AccessError, LoginResponse, MemoryStore, Role};

    fn logged_in(role: Role) -> AuthPolicy<MemoryStore> {
        let mut policy = AuthPolicy::restore(MemoryStore::new());
        policy
            .establish(LoginResponse {
                user: Identity::new("someone", role),
                token: None,
            })
            .unwrap();
        policy
    }

    fn access_error(err: anyhow::Error) -> AccessError {
        err.downcast::<AccessError>().unwrap()
    }

    #[test]
    fn test_anonymous_is_unauthenticated_everywhere() {
        let policy = AuthPolicy::restore(MemoryStore::new());
        for route in [DASHBOARD, ADD_EMPLOYEE, MANAGE_USERS] {
            let err = authorize_route(&policy, route).unwrap_err();
            assert_eq!(access_error(err), AccessError::Unauthenticated);
        }
    }

    #[test]
    fn test_management_is_denied_write_routes() {
        let policy = logged_in(Role::Management);
        assert!(authorize_route(&policy, DASHBOARD).is_ok());
        assert!(authorize_route(&policy, "/employee/EMP001").is_ok());

        let err = authorize_route(&policy, ADD_EMPLOYEE).unwrap_err();
        assert!(matches!(access_error(err), AccessError::Denied(_)));
    }

    #[test]
    fn test_hr_cannot_manage_users() {
        let policy = logged_in(Role::Hr);
        assert!(authorize_route(&policy, ADD_EMPLOYEE).is_ok());
        let err = authorize_route(&policy, MANAGE_USERS).unwrap_err();
        assert!(matches!(access_error(err), AccessError::Denied(d) if d.role == Role::Hr));
    }

    #[test]
    fn test_admin_reaches_everything() {
        let policy = logged_in(Role::Admin);
        for route in [DASHBOARD, ADD_EMPLOYEE, MANAGE_USERS] {
            assert_eq!(authorize_route(&policy, route).unwrap().role(), Role::Admin);
        }
    }
}
