mod employee_form;
mod layout;
mod protected_route;

pub use employee_form::{EmployeeForm, FormMode};
pub use layout::{Header, Layout, Sidebar};
pub use protected_route::{AccessDenied, ProtectedRoute};
