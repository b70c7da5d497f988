//! Sidebar navigation entries and the role-based menu filter

use crate::auth::{Identity, Role};
use crate::guard::has_role;
use crate::routes;

/// One sidebar menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub required: &'static [Role],
}

pub static SIDEBAR_ENTRIES: &[NavEntry] = &[
    NavEntry {
        path: routes::DASHBOARD,
        label: "Dashboard",
        icon: "📊",
        description: "Overview and statistics",
        required: routes::ANY_ROLE,
    },
    NavEntry {
        path: routes::EMPLOYEES,
        label: "Employee List",
        icon: "👥",
        description: "View all employees",
        required: routes::ANY_ROLE,
    },
    NavEntry {
        path: routes::ADD_EMPLOYEE,
        label: "Add Employee",
        icon: "➕",
        description: "Register new employee",
        required: routes::EMPLOYEE_EDITORS,
    },
    NavEntry {
        path: routes::MANAGE_USERS,
        label: "Manage Users",
        icon: "⚙",
        description: "User administration",
        required: routes::ADMIN_ONLY,
    },
];

/// Entries whose required roles the identity satisfies, in input order
pub fn visible_entries<'a>(entries: &'a [NavEntry], identity: Option<&Identity>) -> Vec<&'a NavEntry> {
    entries
        .iter()
        .filter(|entry| has_role(identity, entry.required))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &'static str, required: &'static [Role]) -> NavEntry {
        NavEntry {
            path,
            label: path,
            icon: "",
            description: "",
            required,
        }
    }

    fn paths(entries: &[&NavEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.path).collect()
    }

    #[test]
    fn test_hr_sees_dashboard_and_add_employee() {
        let entries = [
            entry("/dashboard", &[]),
            entry("/add-employee", &[Role::Admin, Role::Hr]),
            entry("/manage-users", &[Role::Admin]),
        ];
        let hr = Identity::new("hr1", Role::Hr);
        assert_eq!(
            paths(&visible_entries(&entries, Some(&hr))),
            vec!["/dashboard", "/add-employee"]
        );
    }

    #[test]
    fn test_sidebar_per_role() {
        let admin = Identity::new("admin", Role::Admin);
        let hr = Identity::new("hr", Role::Hr);
        let manager = Identity::new("management", Role::Management);

        assert_eq!(
            paths(&visible_entries(SIDEBAR_ENTRIES, Some(&admin))),
            vec!["/dashboard", "/employees", "/add-employee", "/manage-users"]
        );
        assert_eq!(
            paths(&visible_entries(SIDEBAR_ENTRIES, Some(&hr))),
            vec!["/dashboard", "/employees", "/add-employee"]
        );
        assert_eq!(
            paths(&visible_entries(SIDEBAR_ENTRIES, Some(&manager))),
            vec!["/dashboard", "/employees"]
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let entries = [
            entry("/z", &[Role::Management]),
            entry("/a", &[]),
            entry("/m", &[Role::Admin]),
            entry("/b", &[Role::Management, Role::Admin]),
        ];
        let manager = Identity::new("m", Role::Management);
        assert_eq!(paths(&visible_entries(&entries, Some(&manager))), vec!["/z", "/a", "/b"]);
    }

    #[test]
    fn test_sidebar_agrees_with_route_table() {
        for entry in SIDEBAR_ENTRIES {
            assert_eq!(routes::required_roles(entry.path), Some(entry.required), "{}", entry.path);
        }
    }
}
