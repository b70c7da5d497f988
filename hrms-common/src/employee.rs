//! Employee directory and record types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Employment status of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Active,
    Exited,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 2] = [EmploymentStatus::Active, EmploymentStatus::Exited];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Active => "Active",
            EmploymentStatus::Exited => "Exited",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the employee directory (`GET /api/employees`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub employee_code: String,
    pub name: String,
    pub team: String,
    pub designation: String,
    #[serde(default)]
    pub reporting_manager: String,
    #[serde(default)]
    pub location: String,
    pub employment_status: EmploymentStatus,
    #[serde(default)]
    pub email_id: String,
}

/// Search and filter criteria for the employee directory.
/// `None` for department or status means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub search: String,
    pub department: Option<String>,
    pub status: Option<EmploymentStatus>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &EmployeeSummary) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty()
            && !employee.name.to_lowercase().contains(&search)
            && !employee.employee_code.to_lowercase().contains(&search)
        {
            return false;
        }

        if let Some(department) = &self.department {
            if &employee.team != department {
                return false;
            }
        }

        if let Some(status) = self.status {
            if employee.employment_status != status {
                return false;
            }
        }

        true
    }

    /// Matching employees in directory order
    pub fn apply<'a>(&self, employees: &'a [EmployeeSummary]) -> Vec<&'a EmployeeSummary> {
        employees.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Distinct teams in first-seen order, for the department dropdown
pub fn departments(employees: &[EmployeeSummary]) -> Vec<String> {
    let mut seen = Vec::new();
    for employee in employees {
        if !seen.contains(&employee.team) {
            seen.push(employee.team.clone());
        }
    }
    seen
}

/// Full record set of one employee (`GET /api/employees/:code`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employees: PersonalDetails,
    #[serde(default)]
    pub skill_matrix: SkillMatrix,
    #[serde(default)]
    pub assets: AssetRecord,
    #[serde(default)]
    pub hr_activity: HrActivity,
    #[serde(default)]
    pub performance: Performance,
}

/// Personal and work information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalDetails {
    pub employee_code: String,
    pub name: String,
    pub email_id: String,
    pub contact_number: String,
    pub emergency_contact: String,
    pub dob: String,
    pub location: String,
    pub mediclaim_included: String,
    pub pf_included: String,
    pub cv_path: Option<String>,
    pub photo_path: Option<String>,
    pub doj: String,
    pub team: String,
    pub designation: String,
    pub reporting_manager: String,
    pub employment_type: String,
    pub employment_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillMatrix {
    pub primary_skillset: String,
    pub secondary_skillset: String,
    pub experience_years: Option<f32>,
    pub last_contact_date: String,
}

/// Issued assets plus the exit-clearance checklist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetRecord {
    pub asset_id: String,
    pub issued_to: String,
    pub issue_date: String,
    pub return_date: Option<String>,
    pub laptop_returned: bool,
    pub laptop_bag_returned: bool,
    pub advance_salary_adjustment: String,
    pub leave_adjustment: String,
    pub remove_from_medical: bool,
    pub remove_from_pf: bool,
    pub email_access_removed: bool,
    pub removed_from_groups: bool,
    pub relieving_letter_shared: bool,
}

impl AssetRecord {
    /// Exit-clearance checklist as (label, done) pairs
    pub fn clearance_checklist(&self) -> [(&'static str, bool); 7] {
        [
            ("Laptop Returned", self.laptop_returned),
            ("Laptop Bag Returned", self.laptop_bag_returned),
            ("Removed From Medical", self.remove_from_medical),
            ("Removed From PF", self.remove_from_pf),
            ("Email Access Removed", self.email_access_removed),
            ("Removed From Groups", self.removed_from_groups),
            ("Relieving Letter Shared", self.relieving_letter_shared),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrActivity {
    pub training_assigned: String,
    pub status: String,
    pub last_follow_up: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Performance {
    pub monthly_check_in_notes: String,
    pub manager_feedback: String,
    pub improvement_areas: String,
    pub recognition_rewards: String,
}

fn yes_no(flag: bool) -> String {
    (if flag { "Yes" } else { "No" }).to_string()
}

impl EmployeeRecord {
    /// Form values keyed by the field names of [`crate::forms`], used to
    /// prefill the edit form
    pub fn form_values(&self) -> BTreeMap<String, String> {
        let e = &self.employees;
        let s = &self.skill_matrix;
        let a = &self.assets;
        let h = &self.hr_activity;
        let p = &self.performance;

        let pairs = [
            ("code", e.employee_code.clone()),
            ("name", e.name.clone()),
            ("dob", e.dob.clone()),
            ("phone", e.contact_number.clone()),
            ("email", e.email_id.clone()),
            ("emergency", e.emergency_contact.clone()),
            ("location", e.location.clone()),
            ("doj", e.doj.clone()),
            ("employment_type", e.employment_type.clone()),
            ("employment_status", e.employment_status.clone()),
            ("team", e.team.clone()),
            ("designation", e.designation.clone()),
            ("manager", e.reporting_manager.clone()),
            ("pf", e.pf_included.clone()),
            ("mediclaim", e.mediclaim_included.clone()),
            ("primary_skills", s.primary_skillset.clone()),
            ("secondary_skills", s.secondary_skillset.clone()),
            ("experience", s.experience_years.map(|y| y.to_string()).unwrap_or_default()),
            ("last_contact", s.last_contact_date.clone()),
            ("asset_id", a.asset_id.clone()),
            ("issue_date", a.issue_date.clone()),
            ("return_date", a.return_date.clone().unwrap_or_default()),
            ("advance_salary_adjustment", a.advance_salary_adjustment.clone()),
            ("leave_adjustment", a.leave_adjustment.clone()),
            ("laptop_returned", yes_no(a.laptop_returned)),
            ("laptop_bag_returned", yes_no(a.laptop_bag_returned)),
            ("remove_from_medical", yes_no(a.remove_from_medical)),
            ("remove_from_pf", yes_no(a.remove_from_pf)),
            ("email_access_removed", yes_no(a.email_access_removed)),
            ("removed_from_groups", yes_no(a.removed_from_groups)),
            ("relieving_letter_shared", yes_no(a.relieving_letter_shared)),
            ("training_assigned", h.training_assigned.clone()),
            ("status", h.status.clone()),
            ("last_follow_up", h.last_follow_up.clone()),
            ("monthly_check_in_notes", p.monthly_check_in_notes.clone()),
            ("manager_feedback", p.manager_feedback.clone()),
            ("improvement_areas", p.improvement_areas.clone()),
            ("recognition_rewards", p.recognition_rewards.clone()),
        ];

        pairs
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

/// Result of `POST /api/employees/bulk`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkUploadReport {
    pub success_count: u32,
    pub error_count: u32,
    #[serde(default)]
    pub errors: Vec<BulkUploadError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUploadError {
    pub row: u32,
    pub message: String,
}

/// Column headers of the bulk upload template
pub const TEMPLATE_COLUMNS: [&str; 17] = [
    "Employee Code",
    "Full Name",
    "Date of Birth (YYYY-MM-DD)",
    "Contact Number",
    "Official Email",
    "Designation",
    "Department",
    "Date of Joining (YYYY-MM-DD)",
    "Employment Type",
    "Location",
    "Reporting Manager",
    "Emergency Contact",
    "PF Included (Yes/No)",
    "Mediclaim Included (Yes/No)",
    "Primary Skills",
    "Secondary Skills",
    "Years of Experience",
];

const TEMPLATE_EXAMPLE_ROW: [&str; 17] = [
    "EMP001",
    "John Doe",
    "1990-01-15",
    "+91-9876543210",
    "john.doe@company.com",
    "Senior Developer",
    "Engineering",
    "2020-06-15",
    "Full-time",
    "Bangalore",
    "Jane Smith",
    "+91-9876543211",
    "Yes",
    "Yes",
    "React, Node.js",
    "AWS, Docker",
    "8",
];

pub const TEMPLATE_FILE_NAME: &str = "employee_upload_template.csv";

/// CSV bulk upload template: the header row and one example row
pub fn template_csv() -> String {
    let mut out = String::new();
    for row in [&TEMPLATE_COLUMNS, &TEMPLATE_EXAMPLE_ROW] {
        let line = row
            .iter()
            .map(|cell| csv_cell(cell))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push_str("\r\n");
    }
    out
}

fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(code: &str, name: &str, team: &str, status: EmploymentStatus) -> EmployeeSummary {
        EmployeeSummary {
            employee_code: code.to_string(),
            name: name.to_string(),
            team: team.to_string(),
            designation: String::new(),
            reporting_manager: String::new(),
            location: String::new(),
            employment_status: status,
            email_id: String::new(),
        }
    }

    fn directory() -> Vec<EmployeeSummary> {
        vec![
            employee("EMP001", "John Doe", "Engineering", EmploymentStatus::Active),
            employee("EMP002", "Jane Smith", "Engineering", EmploymentStatus::Active),
            employee("EMP003", "Bob Wilson", "Sales", EmploymentStatus::Active),
            employee("EMP004", "Alice Cooper", "Marketing", EmploymentStatus::Exited),
        ]
    }

    fn codes(list: &[&EmployeeSummary]) -> Vec<String> {
        list.iter().map(|e| e.employee_code.clone()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let list = directory();
        assert_eq!(EmployeeFilter::default().apply(&list).len(), 4);
    }

    #[test]
    fn test_search_matches_name_or_code_case_insensitively() {
        let list = directory();
        let by_name = EmployeeFilter { search: "jane".into(), ..Default::default() };
        assert_eq!(codes(&by_name.apply(&list)), vec!["EMP002"]);

        let by_code = EmployeeFilter { search: "emp00".into(), ..Default::default() };
        assert_eq!(by_code.apply(&list).len(), 4);

        let none = EmployeeFilter { search: "zzz".into(), ..Default::default() };
        assert!(none.apply(&list).is_empty());
    }

    #[test]
    fn test_department_and_status_combine() {
        let list = directory();
        let filter = EmployeeFilter {
            search: String::new(),
            department: Some("Engineering".into()),
            status: Some(EmploymentStatus::Active),
        };
        assert_eq!(codes(&filter.apply(&list)), vec!["EMP001", "EMP002"]);

        let exited = EmployeeFilter { status: Some(EmploymentStatus::Exited), ..Default::default() };
        assert_eq!(codes(&exited.apply(&list)), vec!["EMP004"]);
    }

    #[test]
    fn test_departments_first_seen_order() {
        assert_eq!(departments(&directory()), vec!["Engineering", "Sales", "Marketing"]);
    }

    #[test]
    fn test_record_parses_with_missing_sections() {
        let record: EmployeeRecord = serde_json::from_str(
            r#"{"employees":{"employee_code":"EMP001","name":"John Doe"}}"#,
        )
        .unwrap();
        assert_eq!(record.employees.name, "John Doe");
        assert_eq!(record.assets, AssetRecord::default());
    }

    #[test]
    fn test_form_values_prefill() {
        let mut record = EmployeeRecord::default();
        record.employees.name = "John Doe".into();
        record.skill_matrix.experience_years = Some(8.0);
        record.assets.laptop_returned = true;

        let values = record.form_values();
        assert_eq!(values.get("name").map(String::as_str), Some("John Doe"));
        assert_eq!(values.get("experience").map(String::as_str), Some("8"));
        assert_eq!(values.get("laptop_returned").map(String::as_str), Some("Yes"));
        assert_eq!(values.get("remove_from_pf").map(String::as_str), Some("No"));
        assert!(!values.contains_key("designation"));
    }

    #[test]
    fn test_template_csv_quotes_cells_with_commas() {
        let csv = template_csv();
        let lines: Vec<&str> = csv.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Employee Code,Full Name,"));
        assert!(lines[1].contains("\"React, Node.js\""));
    }
}
