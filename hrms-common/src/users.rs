///! User account administration types (Admin only)

use crate::auth::{Identity, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login account as listed by `GET /api/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub role: Role,
}

impl UserAccount {
    /// Accounts cannot delete themselves
    pub fn can_be_deleted_by(&self, current: &Identity) -> bool {
        self.username != current.username()
    }
}

/// Body of `POST /api/users`
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl CreateUserRequest {
    /// New accounts default to the HR role
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: Role::Hr,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err("Please fill in all fields");
        }
        if self.username.contains(char::is_whitespace) || self.username.contains('/') {
            return Err("Username may not contain spaces or '/'");
        }
        Ok(())
    }
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Body of `PUT /api/users/:username/password`
#[derive(Clone, Serialize, Deserialize)]
pub struct PasswordUpdate {
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_cannot_delete_self() {
        let admin = Identity::new("admin", Role::Admin);
        let own = UserAccount { username: "admin".into(), role: Role::Admin };
        let other = UserAccount { username: "hr_manager".into(), role: Role::Hr };
        assert!(!own.can_be_deleted_by(&admin));
        assert!(other.can_be_deleted_by(&admin));
    }

    #[test]
    fn test_create_user_defaults_and_validation() {
        let request = CreateUserRequest::new("johndoe", "secret");
        assert_eq!(request.role, Role::Hr);
        assert!(request.validate().is_ok());

        assert!(CreateUserRequest::new("", "secret").validate().is_err());
        assert!(CreateUserRequest::new("johndoe", "").validate().is_err());
        assert!(CreateUserRequest::new("john doe", "secret").validate().is_err());
    }

    #[test]
    fn test_password_update_wire_name() {
        let body = PasswordUpdate { new_password: "n3w".into() };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"newPassword":"n3w"}"#);
    }
}
