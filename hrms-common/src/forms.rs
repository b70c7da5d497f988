///! Employee form layout and client-side checks
///!
///! The add and edit screens render the same sections; field names double as
///! multipart part names for `POST /api/employees` and
///! `PUT /api/employees/:code`.

use std::collections::BTreeMap;

pub const LOCATIONS: &[&str] = &["Bangalore", "Hyderabad", "Remote", "Delhi", "Mumbai"];
pub const DEPARTMENTS: &[&str] = &["Engineering", "Sales", "Marketing", "HR", "Finance", "Operations"];
pub const EMPLOYMENT_TYPES: &[&str] = &["Full-time", "Contract", "Intern"];
pub const EMPLOYMENT_STATUSES: &[&str] = &["Active", "Exited"];
pub const YES_NO: &[&str] = &["Yes", "No"];

/// Multipart part name of the profile photo
pub const PHOTO_FIELD: &str = "photo";
/// Multipart part name of the CV document
pub const CV_FIELD: &str = "cv";
pub const PHOTO_ACCEPT: &str = "image/*";
pub const CV_ACCEPT: &str = ".pdf,.doc,.docx";
pub const BULK_ACCEPT: &str = ".xlsx,.xls,.csv";
/// Multipart part name of the bulk upload spreadsheet
pub const BULK_FILE_FIELD: &str = "file";

/// The field carrying the employee code; fixed once the record exists
pub const CODE_FIELD: &str = "code";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Number,
    TextArea,
    Select(&'static [&'static str]),
}

impl FieldKind {
    /// `type` attribute for `<input>` elements
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
            FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false }
    }

    const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    /// Initial value for a blank form: first option of a select, else empty
    pub fn default_value(&self) -> &'static str {
        match self.kind {
            FieldKind::Select(options) => options.first().copied().unwrap_or(""),
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSection {
    pub id: &'static str,
    pub title: &'static str,
    /// Short label for tabbed layouts
    pub tab: &'static str,
    pub fields: &'static [FormField],
}

use FieldKind::*;

pub static EMPLOYEE_FORM: &[FormSection] = &[
    FormSection {
        id: "personal",
        title: "Personal Details",
        tab: "Personal",
        fields: &[
            FormField::new("name", "Full Name", Text).required(),
            FormField::new("dob", "Date of Birth", Date),
            FormField::new("phone", "Contact Number", Tel).required(),
            FormField::new("email", "Official Email", Email).required(),
            FormField::new("emergency", "Emergency Contact", Tel),
            FormField::new("location", "Location", Select(LOCATIONS)),
        ],
    },
    FormSection {
        id: "work",
        title: "Work Details",
        tab: "Work",
        fields: &[
            FormField::new(CODE_FIELD, "Employee Code", Text).required(),
            FormField::new("doj", "Date of Joining", Date),
            FormField::new("employment_type", "Employment Type", Select(EMPLOYMENT_TYPES)),
            FormField::new("employment_status", "Employment Status", Select(EMPLOYMENT_STATUSES)),
            FormField::new("team", "Department", Select(DEPARTMENTS)),
            FormField::new("designation", "Designation", Text).required(),
            FormField::new("manager", "Reporting Manager", Text),
            FormField::new("pf", "PF Included?", Select(YES_NO)),
            FormField::new("mediclaim", "Mediclaim Included?", Select(YES_NO)),
        ],
    },
    FormSection {
        id: "skills",
        title: "Skills & Experience",
        tab: "Skills",
        fields: &[
            FormField::new("primary_skills", "Primary Skills", Text),
            FormField::new("secondary_skills", "Secondary Skills", Text),
            FormField::new("experience", "Years of Experience", Number),
            FormField::new("last_contact", "Last Contact Date", Date),
        ],
    },
    FormSection {
        id: "assets",
        title: "Asset Management",
        tab: "Assets",
        fields: &[
            FormField::new("asset_id", "Asset ID", Text),
            FormField::new("issue_date", "Issue Date", Date),
            FormField::new("return_date", "Return Date", Date),
            FormField::new("advance_salary_adjustment", "Advance Salary Adjustment", Text),
            FormField::new("leave_adjustment", "Leave Adjustment", Select(YES_NO)),
            FormField::new("laptop_returned", "Laptop Returned", Select(YES_NO)),
            FormField::new("laptop_bag_returned", "Laptop Bag Returned", Select(YES_NO)),
            FormField::new("remove_from_medical", "Remove From Medical", Select(YES_NO)),
            FormField::new("remove_from_pf", "Remove From PF", Select(YES_NO)),
            FormField::new("email_access_removed", "Email Access Removed", Select(YES_NO)),
            FormField::new("removed_from_groups", "Removed From Groups", Select(YES_NO)),
            FormField::new("relieving_letter_shared", "Relieving Letter Shared", Select(YES_NO)),
        ],
    },
    FormSection {
        id: "hr_activity",
        title: "HR Activity",
        tab: "Work",
        fields: &[
            FormField::new("training_assigned", "Training Assigned", Text),
            FormField::new("status", "Status", Select(EMPLOYMENT_STATUSES)),
            FormField::new("last_follow_up", "Last Follow Up", Date),
        ],
    },
    FormSection {
        id: "performance",
        title: "Performance",
        tab: "Performance",
        fields: &[
            FormField::new("monthly_check_in_notes", "Monthly Check-in Notes", TextArea),
            FormField::new("manager_feedback", "Manager Feedback", TextArea),
            FormField::new("improvement_areas", "Improvement Areas", TextArea),
            FormField::new("recognition_rewards", "Recognition & Rewards", TextArea),
        ],
    },
];

/// Values of a blank form with select defaults filled in
pub fn blank_values() -> BTreeMap<String, String> {
    fields()
        .map(|f| (f.name.to_string(), f.default_value().to_string()))
        .collect()
}

/// Sections offered when editing an existing record
pub fn edit_sections() -> impl Iterator<Item = &'static FormSection> {
    EMPLOYEE_FORM.iter()
}

/// Distinct tab labels of the edit layout, in form order. Several sections
/// may share a tab.
pub fn edit_tabs() -> Vec<&'static str> {
    let mut tabs: Vec<&'static str> = Vec::new();
    for section in edit_sections() {
        if !tabs.contains(&section.tab) {
            tabs.push(section.tab);
        }
    }
    tabs
}

pub fn fields() -> impl Iterator<Item = &'static FormField> {
    EMPLOYEE_FORM.iter().flat_map(|section| section.fields.iter())
}

/// Labels of required fields that are blank, in form order
pub fn missing_required(values: &BTreeMap<String, String>) -> Vec<&'static str> {
    fields()
        .filter(|f| f.required)
        .filter(|f| values.get(f.name).map_or(true, |v| v.trim().is_empty()))
        .map(|f| f.label)
        .collect()
}

/// Client-side checks before submitting. Returns one message per problem.
pub fn validate(values: &BTreeMap<String, String>) -> Result<(), Vec<String>> {
    let mut problems: Vec<String> = missing_required(values)
        .into_iter()
        .map(|label| format!("{} is required", label))
        .collect();

    if let Some(email) = values.get("email").map(|v| v.trim()) {
        if !email.is_empty() && !looks_like_email(email) {
            problems.push(format!("'{}' is not a valid email address", email));
        }
    }

    if let Some(years) = values.get("experience").map(|v| v.trim()) {
        if !years.is_empty() && !years.parse::<f32>().map_or(false, |y| y >= 0.0) {
            problems.push("Years of Experience must be a non-negative number".to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> BTreeMap<String, String> {
        let mut values = blank_values();
        for (k, v) in [
            ("name", "John Doe"),
            ("phone", "+91-9876543210"),
            ("email", "john.doe@company.com"),
            ("code", "EMP001"),
            ("designation", "Senior Developer"),
        ] {
            values.insert(k.to_string(), v.to_string());
        }
        values
    }

    #[test]
    fn test_field_names_are_unique() {
        let mut names: Vec<_> = fields().map(|f| f.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_edit_tabs() {
        assert_eq!(edit_tabs(), ["Personal", "Work", "Skills", "Assets", "Performance"]);
    }

    #[test]
    fn test_edit_form_covers_status_and_hr_activity() {
        let work_fields: Vec<_> = edit_sections()
            .filter(|s| s.tab == "Work")
            .flat_map(|s| s.fields.iter().map(|f| f.name))
            .collect();
        for name in ["employment_status", "training_assigned", "status", "last_follow_up"] {
            assert!(work_fields.contains(&name), "{name} missing from the Work tab");
        }

        let status = fields().find(|f| f.name == "employment_status").unwrap();
        assert_eq!(status.kind, Select(EMPLOYMENT_STATUSES));
        assert_eq!(blank_values()["employment_status"], "Active");
    }

    #[test]
    fn test_blank_values_use_first_option() {
        let values = blank_values();
        assert_eq!(values["location"], "Bangalore");
        assert_eq!(values["employment_type"], "Full-time");
        assert_eq!(values["pf"], "Yes");
        assert_eq!(values["name"], "");
    }

    #[test]
    fn test_missing_required_in_form_order() {
        assert_eq!(
            missing_required(&blank_values()),
            vec!["Full Name", "Contact Number", "Official Email", "Employee Code", "Designation"]
        );
        assert!(missing_required(&filled()).is_empty());
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut values = filled();
        values.insert("name".into(), "   ".into());
        assert_eq!(missing_required(&values), vec!["Full Name"]);
    }

    #[test]
    fn test_validate_email_and_experience() {
        assert!(validate(&filled()).is_ok());

        let mut values = filled();
        values.insert("email".into(), "john.doe".into());
        values.insert("experience".into(), "-2".into());
        let problems = validate(&values).unwrap_err();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("john.doe"));
        assert!(problems[1].contains("Years of Experience"));
    }

    #[test]
    fn test_every_record_key_is_a_form_field() {
        let mut record = crate::employee::EmployeeRecord::default();
        record.employees.name = "x".into();
        record.employees.employment_status = "Exited".into();
        record.hr_activity.training_assigned = "Onboarding".into();
        let values = record.form_values();
        for key in values.keys() {
            assert!(edit_sections().flat_map(|s| s.fields).any(|f| f.name == key.as_str()), "unknown form key {key}");
        }
        assert_eq!(values["employment_status"], "Exited");
        assert_eq!(values["training_assigned"], "Onboarding");
    }
}
