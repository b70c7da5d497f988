///! Static route permission table
///!
///! Every navigable path of the application with the roles allowed to open
///! it. An empty role list means any authenticated identity.

use crate::auth::Role;

pub const DASHBOARD: &str = "/dashboard";
pub const EMPLOYEES: &str = "/employees";
pub const EMPLOYEE_PROFILE: &str = "/employee/:code";
pub const ADD_EMPLOYEE: &str = "/add-employee";
pub const MANAGE_USERS: &str = "/manage-users";

pub const ANY_ROLE: &[Role] = &[];
pub const EMPLOYEE_EDITORS: &[Role] = &[Role::Admin, Role::Hr];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Required-role set for one path pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePermission {
    pub pattern: &'static str,
    pub required: &'static [Role],
}

pub static ROUTE_PERMISSIONS: &[RoutePermission] = &[
    RoutePermission { pattern: DASHBOARD, required: ANY_ROLE },
    RoutePermission { pattern: EMPLOYEES, required: ANY_ROLE },
    RoutePermission { pattern: EMPLOYEE_PROFILE, required: ANY_ROLE },
    RoutePermission { pattern: ADD_EMPLOYEE, required: EMPLOYEE_EDITORS },
    RoutePermission { pattern: MANAGE_USERS, required: ADMIN_ONLY },
];

/// Roles required for `path`, or `None` when the path is not a protected
/// route. Query strings, fragments and a trailing slash are ignored.
pub fn required_roles(path: &str) -> Option<&'static [Role]> {
    let path = strip_suffixes(path);
    ROUTE_PERMISSIONS
        .iter()
        .find(|rule| path_matches(rule.pattern, path))
        .map(|rule| rule.required)
}

/// Path of an employee's profile page
pub fn employee_profile_path(code: &str) -> String {
    format!("/employee/{}", urlencoding::encode(code))
}

fn strip_suffixes(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) if p.starts_with(':') => {
                if s.is_empty() {
                    return false;
                }
            }
            (Some(p), Some(s)) if p == s => {}
            _ => return false,
        }
    }
}
