///! Employee directory and record commands

use super::authorize_route;
use crate::api::ApiClient;
use crate::output::{self, OutputFormat};
use crate::session::FileStore;
use crate::EmployeeCommands;
use anyhow::{Context, Result};
use colored::Colorize;
use hrms_common::employee::{
    template_csv, BulkUploadReport, EmployeeFilter, EmployeeRecord, EmployeeSummary, EmploymentStatus,
    TEMPLATE_FILE_NAME,
};
use hrms_common::forms::{self, BULK_ACCEPT, BULK_FILE_FIELD, CV_FIELD, PHOTO_FIELD};
use hrms_common::routes::{self, employee_profile_path};
use hrms_common::AuthPolicy;
use reqwest::multipart::{Form, Part};
use std::collections::BTreeMap;
use std::path::Path;
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusArg {
    Active,
    Exited,
}

impl From<StatusArg> for EmploymentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => EmploymentStatus::Active,
            StatusArg::Exited => EmploymentStatus::Exited,
        }
    }
}

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DEPARTMENT")]
    team: String,
    #[tabled(rename = "DESIGNATION")]
    designation: String,
    #[tabled(rename = "LOCATION")]
    location: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

impl From<EmployeeSummary> for EmployeeRow {
    fn from(e: EmployeeSummary) -> Self {
        Self {
            code: e.employee_code,
            name: e.name,
            team: e.team,
            designation: e.designation,
            location: e.location,
            status: e.employment_status.to_string(),
        }
    }
}

pub async fn handle_employee_command(
    command: EmployeeCommands,
    api: &ApiClient,
    policy: &AuthPolicy<FileStore>,
    format: OutputFormat,
) -> Result<()> {
    match command {
        EmployeeCommands::List { search, department, status } => {
            authorize_route(policy, routes::EMPLOYEES)?;
            let all: Vec<EmployeeSummary> = api.get("/api/employees").await?;

            let filter = EmployeeFilter {
                search: search.unwrap_or_default(),
                department,
                status: status.map(EmploymentStatus::from),
            };
            let total = all.len();
            let visible: Vec<EmployeeSummary> = filter.apply(&all).into_iter().cloned().collect();
            let shown = visible.len();

            output::print_list::<_, EmployeeRow>(visible, format)?;
            if format == OutputFormat::Table {
                println!("{}", format!("{} of {} employees", shown, total).dimmed());
            }
        }

        EmployeeCommands::Show { code } => {
            authorize_route(policy, &employee_profile_path(&code))?;
            let record: EmployeeRecord = api.get(&employee_api_path(&code)).await?;
            if !output::print_structured(&record, format)? {
                print_record(&record);
            }
        }

        EmployeeCommands::Add { file, photo, cv } => {
            authorize_route(policy, routes::ADD_EMPLOYEE)?;

            let mut values = forms::blank_values();
            values.extend(read_field_file(Path::new(&file))?);
            check_form(&values)?;

            let form = build_form(&values, photo.as_deref(), cv.as_deref()).await?;
            api.send_form(reqwest::Method::POST, "/api/employees", form).await?;
            output::print_success("Employee added successfully!");
        }

        EmployeeCommands::Update { code, file, photo, cv } => {
            policy.authorize(routes::EMPLOYEE_EDITORS).map_err(anyhow::Error::from)?;

            let current: EmployeeRecord = api.get(&employee_api_path(&code)).await?;
            let mut values = forms::blank_values();
            values.extend(current.form_values());
            values.extend(read_field_file(Path::new(&file))?);
            // the code identifies the record and is never changed by an update
            values.insert(forms::CODE_FIELD.to_string(), code.clone());
            check_form(&values)?;

            let form = build_form(&values, photo.as_deref(), cv.as_deref()).await?;
            api.send_form(reqwest::Method::PUT, &employee_api_path(&code), form).await?;
            output::print_success("Changes saved successfully!");
        }

        EmployeeCommands::Bulk { file } => {
            authorize_route(policy, routes::ADD_EMPLOYEE)?;
            let path = Path::new(&file);
            if !is_bulk_file(path) {
                anyhow::bail!("Unsupported file type; expected one of {}", BULK_ACCEPT);
            }

            let form = Form::new().part(BULK_FILE_FIELD, file_part(path).await?);
            let report: BulkUploadReport = api
                .send_form(reqwest::Method::POST, "/api/employees/bulk", form)
                .await?
                .json()
                .await?;

            if !output::print_structured(&report, format)? {
                print_report(&report);
            }
        }

        EmployeeCommands::Template { output: target } => {
            let target = target.unwrap_or_else(|| TEMPLATE_FILE_NAME.to_string());
            std::fs::write(&target, template_csv()).with_context(|| format!("failed to write {}", target))?;
            output::print_success(&format!("Template written to {}", target));
        }
    }

    Ok(())
}

fn employee_api_path(code: &str) -> String {
    format!("/api/employees/{}", urlencoding::encode(code))
}

/// Form values from a JSON object. Numbers and booleans are accepted and
/// stored in their text form; `null` means blank.
fn parse_field_values(json: &str) -> Result<BTreeMap<String, String>> {
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(json).context("expected a JSON object of field names to values")?;

    object
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                serde_json::Value::Bool(b) => (if b { "Yes" } else { "No" }).to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                other => anyhow::bail!("field '{}' must be a plain value, got {}", name, other),
            };
            Ok((name, text))
        })
        .collect()
}

fn read_field_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let values = parse_field_values(&contents).with_context(|| format!("invalid field file {}", path.display()))?;

    let known: Vec<&str> = forms::fields().map(|f| f.name).collect();
    for name in values.keys().filter(|name| !known.contains(&name.as_str())) {
        output::print_warning(&format!("ignoring unknown field '{}'", name));
    }
    Ok(values
        .into_iter()
        .filter(|(name, _)| known.contains(&name.as_str()))
        .collect())
}

fn check_form(values: &BTreeMap<String, String>) -> Result<()> {
    if let Err(problems) = forms::validate(values) {
        for problem in &problems {
            output::print_error(problem);
        }
        anyhow::bail!("{} field(s) need attention", problems.len());
    }
    Ok(())
}

fn is_bulk_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = format!(".{}", ext.to_ascii_lowercase());
    BULK_ACCEPT.split(',').any(|accepted| accepted.trim() == ext)
}

async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Part::bytes(bytes).file_name(name))
}

/// Multipart body: every form value as a text part plus any given files
async fn build_form(values: &BTreeMap<String, String>, photo: Option<&str>, cv: Option<&str>) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in values {
        form = form.text(name.clone(), value.clone());
    }
    for (field, path) in [(PHOTO_FIELD, photo), (CV_FIELD, cv)] {
        if let Some(path) = path {
            form = form.part(field, file_part(Path::new(path)).await?);
        }
    }
    Ok(form)
}

fn print_record(record: &EmployeeRecord) {
    let e = &record.employees;
    println!("{} ({})", e.name.bold(), e.employee_code);
    println!("{} | {} | {}", e.designation, e.team, e.employment_status);

    println!("\n{}", "Personal".bold());
    output::print_field("Email", &e.email_id);
    output::print_field("Phone", &e.contact_number);
    output::print_field("Emergency Contact", &e.emergency_contact);
    output::print_field("Date of Birth", &e.dob);
    output::print_field("Location", &e.location);
    output::print_field("Mediclaim", &e.mediclaim_included);
    output::print_field("PF Included", &e.pf_included);
    output::print_field("CV", e.cv_path.as_deref().unwrap_or_default());

    println!("\n{}", "Work".bold());
    output::print_field("Date of Joining", &e.doj);
    output::print_field("Reporting Manager", &e.reporting_manager);
    output::print_field("Employment Type", &e.employment_type);

    let s = &record.skill_matrix;
    println!("\n{}", "Skills".bold());
    output::print_field("Primary Skills", &s.primary_skillset);
    output::print_field("Secondary Skills", &s.secondary_skillset);
    output::print_field(
        "Experience",
        &s.experience_years.map(|y| format!("{} years", y)).unwrap_or_default(),
    );
    output::print_field("Last Contact Date", &s.last_contact_date);

    let a = &record.assets;
    println!("\n{}", "Assets".bold());
    output::print_field("Asset ID", &a.asset_id);
    output::print_field("Issue Date", &a.issue_date);
    output::print_field("Return Date", a.return_date.as_deref().unwrap_or_default());
    for (label, done) in a.clearance_checklist() {
        let mark = if done { "✓".green() } else { "·".dimmed() };
        println!("  {} {}", mark, label);
    }

    let h = &record.hr_activity;
    println!("\n{}", "HR Activity".bold());
    output::print_field("Training Assigned", &h.training_assigned);
    output::print_field("Status", &h.status);
    output::print_field("Last Follow Up", &h.last_follow_up);

    let p = &record.performance;
    println!("\n{}", "Performance".bold());
    output::print_field("Monthly Check-in Notes", &p.monthly_check_in_notes);
    output::print_field("Manager Feedback", &p.manager_feedback);
    output::print_field("Improvement Areas", &p.improvement_areas);
    output::print_field("Recognition & Rewards", &p.recognition_rewards);
}

fn print_report(report: &BulkUploadReport) {
    output::print_success(&format!("{} employees imported", report.success_count));
    if report.error_count > 0 {
        output::print_warning(&format!("{} rows failed", report.error_count));
    }
    for err in &report.errors {
        println!("  Row {}: {}", err.row, err.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_values_stringifies_scalars() {
        let values = parse_field_values(r#"{"name":"Jane","experience":4.5,"pf":true,"manager":null}"#).unwrap();
        assert_eq!(values["name"], "Jane");
        assert_eq!(values["experience"], "4.5");
        assert_eq!(values["pf"], "Yes");
        assert_eq!(values["manager"], "");
    }

    #[test]
    fn test_parse_field_values_rejects_nested_values() {
        assert!(parse_field_values(r#"{"name":["a","b"]}"#).is_err());
        assert!(parse_field_values(r#"["name"]"#).is_err());
    }

    #[test]
    fn test_read_field_file_drops_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jane.json");
        std::fs::write(&path, r#"{"name":"Jane","favourite_colour":"blue"}"#).unwrap();

        let values = read_field_file(&path).unwrap();
        assert_eq!(values.get("name").map(String::as_str), Some("Jane"));
        assert!(!values.contains_key("favourite_colour"));
    }

    #[test]
    fn test_bulk_file_extensions() {
        assert!(is_bulk_file(Path::new("staff.xlsx")));
        assert!(is_bulk_file(Path::new("staff.CSV")));
        assert!(is_bulk_file(Path::new("dir/staff.xls")));
        assert!(!is_bulk_file(Path::new("staff.json")));
        assert!(!is_bulk_file(Path::new("staff")));
    }

    #[test]
    fn test_employee_api_path_encodes_code() {
        assert_eq!(employee_api_path("EMP 1"), "/api/employees/EMP%201");
    }
}
