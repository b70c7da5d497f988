///! Authentication and authorization types

use crate::error::UnknownRole;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access role issued to an account by the authentication service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[serde(rename = "HR")]
    Hr,
    Management,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Hr, Role::Management];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Hr => "HR",
            Role::Management => "Management",
        }
    }

    /// Short summary shown on the user administration screen
    pub fn description(&self) -> &'static str {
        match self {
            Role::Admin => "Full access, including user account administration",
            Role::Hr => "Can view and add employee records",
            Role::Management => "Read-only access to the dashboard and employee directory",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "hr" => Ok(Role::Hr),
            "management" => Ok(Role::Management),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// The authenticated user for the current session.
///
/// Fields are private: once issued, neither the username nor the role can be
/// changed for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    username: String,
    role: Role,
}

impl Identity {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Upper-cased first letter of the username, used for avatars
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Login request body for `POST /api/auth/login`
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response: the server-issued identity plus an optional bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: Identity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"HR\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        let role: Role = serde_json::from_str("\"Management\"").unwrap();
        assert_eq!(role, Role::Management);
    }

    #[test]
    fn test_role_rejects_unknown_wire_name() {
        assert!(serde_json::from_str::<Role>("\"Superuser\"").is_err());
        assert!(serde_json::from_str::<Role>("\"hr\"").is_err());
    }

    #[test]
    fn test_role_from_str_is_case_insensitive() {
        assert_eq!("hr".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!(" ADMIN ".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_identity_json_shape() {
        let identity = Identity::new("hr1", Role::Hr);
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json, serde_json::json!({ "username": "hr1", "role": "HR" }));
    }

    #[test]
    fn test_identity_initial() {
        assert_eq!(Identity::new("admin", Role::Admin).initial(), "A");
        assert_eq!(Identity::new("", Role::Admin).initial(), "");
    }

    #[test]
    fn test_login_response_token_optional() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"user":{"username":"admin","role":"Admin"}}"#).unwrap();
        assert_eq!(response.user.role(), Role::Admin);
        assert!(response.token.is_none());
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let request = LoginRequest {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", request);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }
}
