//! Common types and the session/authorization policy shared between
//! hrms-ui and hrms-cli

pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod error;
pub mod forms;
pub mod guard;
pub mod nav;
pub mod policy;
pub mod routes;
pub mod session;
pub mod submit;
pub mod users;

pub use auth::{Identity, LoginRequest, LoginResponse, Role};
pub use error::{AccessError, AuthError, AuthorizationDenied, StorageError};
pub use guard::{GuardOutcome, LOGIN_PATH};
pub use policy::{AuthPolicy, Authenticator};
pub use session::{MemoryStore, SessionStore};
pub use submit::{SubmitGate, SubmitTicket};
