use crate::api::file_url;
use crate::auth::use_auth;
use crate::browser;
use crate::components::{EmployeeForm, FormMode};
use crate::error::LoadingError;
use hrms_common::employee::EmployeeRecord;
use hrms_common::routes;
use leptos::*;
use leptos_router::{use_params_map, A};

const TABS: [(&str, &str); 6] = [
    ("personal", "Personal"),
    ("work", "Work"),
    ("skills", "Skills"),
    ("assets", "Assets"),
    ("hr_activity", "HR Activity"),
    ("performance", "Performance"),
];

#[component]
pub fn EmployeeProfile() -> impl IntoView {
    let auth = use_auth();
    let params = use_params_map();
    let code = move || params.with(|p| p.get("code").cloned().unwrap_or_default());

    let record = create_local_resource(code, move |code| async move { auth.client().get_employee(&code).await });
    let (editing, set_editing) = create_signal(false);

    view! {
        <div class="employee-profile">
            <A href=routes::EMPLOYEES class="back-link">"← Back to Employee List"</A>

            <Suspense fallback=move || view! { <p>"Loading employee details..."</p> }>
                {move || record.get().map(|result| match result {
                    Err(error) => view! {
                        <LoadingError error=error on_retry=Callback::new(move |_| record.refetch())/>
                    }
                    .into_view(),
                    Ok(employee) => {
                        let employee = store_value(employee);
                        let can_edit = move || auth.has_role(routes::EMPLOYEE_EDITORS);
                        let on_saved = Callback::new(move |_| {
                            browser::alert("Changes saved successfully!");
                            set_editing.set(false);
                            record.refetch();
                        });

                        view! {
                            <div class="profile-body">
                                {move || employee.with_value(|e| view! { <ProfileHeader record=e.clone()/> })}
                                <Show when=move || can_edit() && !editing.get()>
                                    <button class="btn btn-primary" on:click=move |_| set_editing.set(true)>"✎ Edit"</button>
                                </Show>
                                <Show
                                    when=move || editing.get() && can_edit()
                                    fallback=move || employee.with_value(|e| view! { <ProfileTabs record=e.clone()/> })
                                >
                                    <div class="card">
                                        <h2>"Edit Employee Profile"</h2>
                                        {employee.with_value(|e| {
                                            let mode = FormMode::Edit { code: e.employees.employee_code.clone() };
                                            view! {
                                                <EmployeeForm
                                                    mode=mode
                                                    initial=e.form_values()
                                                    on_saved=on_saved
                                                    on_cancel=Callback::new(move |_| set_editing.set(false))
                                                />
                                            }
                                        })}
                                    </div>
                                </Show>
                            </div>
                        }
                        .into_view()
                    }
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn ProfileHeader(record: EmployeeRecord) -> impl IntoView {
    let e = record.employees;
    let initial = e.name.chars().next().map(String::from).unwrap_or_default();
    let status_class = if e.employment_status == "Active" { "status-active" } else { "status-exited" };

    view! {
        <div class="card profile-header">
            <div class="avatar avatar-lg">
                {match e.photo_path {
                    Some(path) => view! { <img src=file_url(&path) alt=e.name.clone()/> }.into_view(),
                    None => initial.into_view(),
                }}
            </div>
            <div>
                <h1>{e.name.clone()}</h1>
                <p>{format!("{} | {}", e.designation, e.team)}</p>
                <p class="muted">
                    "Code: "{e.employee_code}" | Status: "
                    <span class=status_class>{e.employment_status}</span>
                </p>
            </div>
        </div>
    }
}

#[component]
fn ProfileTabs(record: EmployeeRecord) -> impl IntoView {
    let (active, set_active) = create_signal(TABS[0].0);
    let record = store_value(record);

    view! {
        <div class="card">
            <nav class="tabs">
                {TABS.into_iter().map(|(id, label)| view! {
                    <button
                        class=move || if active.get() == id { "tab active" } else { "tab" }
                        on:click=move |_| set_active.set(id)
                    >
                        {label}
                    </button>
                }).collect_view()}
            </nav>
            <div class="tab-content">
                {move || record.with_value(|r| tab_content(active.get(), r))}
            </div>
        </div>
    }
}

fn tab_content(tab: &str, r: &EmployeeRecord) -> View {
    let e = &r.employees;
    match tab {
        "personal" => view! {
            <div class="info-grid">
                <InfoField label="Email" value=e.email_id.clone()/>
                <InfoField label="Phone" value=e.contact_number.clone()/>
                <InfoField label="Emergency Contact" value=e.emergency_contact.clone()/>
                <InfoField label="Date of Birth" value=e.dob.clone()/>
                <InfoField label="Location" value=e.location.clone()/>
                <InfoField label="Mediclaim" value=e.mediclaim_included.clone()/>
                <InfoField label="PF Included" value=e.pf_included.clone()/>
                {e.cv_path.clone().map(|path| view! { <CvActions path=path/> })}
            </div>
        }
        .into_view(),
        "work" => view! {
            <div class="info-grid">
                <InfoField label="Date of Joining" value=e.doj.clone()/>
                <InfoField label="Department" value=e.team.clone()/>
                <InfoField label="Designation" value=e.designation.clone()/>
                <InfoField label="Reporting Manager" value=e.reporting_manager.clone()/>
                <InfoField label="Employment Type" value=e.employment_type.clone()/>
                <InfoField label="Employment Status" value=e.employment_status.clone()/>
            </div>
        }
        .into_view(),
        "skills" => {
            let s = &r.skill_matrix;
            view! {
                <div class="info-grid">
                    <InfoField label="Primary Skills" value=s.primary_skillset.clone()/>
                    <InfoField label="Secondary Skills" value=s.secondary_skillset.clone()/>
                    <InfoField
                        label="Experience"
                        value=s.experience_years.map(|y| format!("{} years", y)).unwrap_or_default()
                    />
                    <InfoField label="Last Contact Date" value=s.last_contact_date.clone()/>
                </div>
            }
            .into_view()
        }
        "assets" => {
            let a = &r.assets;
            view! {
                <div class="info-grid">
                    <InfoField label="Asset ID" value=a.asset_id.clone()/>
                    <InfoField label="Issued To" value=a.issued_to.clone()/>
                    <InfoField label="Issue Date" value=a.issue_date.clone()/>
                    <InfoField label="Return Date" value=a.return_date.clone().unwrap_or_default()/>
                    <InfoField label="Advance Salary Adjustment" value=a.advance_salary_adjustment.clone()/>
                    <InfoField label="Leave Adjustment" value=a.leave_adjustment.clone()/>
                </div>
                <h3>"Exit Clearance"</h3>
                <ul class="checklist">
                    {a.clearance_checklist().into_iter().map(|(label, done)| view! {
                        <li class:done=done>{if done { "✅ " } else { "⬜ " }}{label}</li>
                    }).collect_view()}
                </ul>
            }
            .into_view()
        }
        "hr_activity" => {
            let h = &r.hr_activity;
            view! {
                <div class="info-grid">
                    <InfoField label="Training Assigned" value=h.training_assigned.clone()/>
                    <InfoField label="Status" value=h.status.clone()/>
                    <InfoField label="Last Follow Up" value=h.last_follow_up.clone()/>
                </div>
            }
            .into_view()
        }
        _ => {
            let p = &r.performance;
            view! {
                <div class="info-stack">
                    <InfoField label="Monthly Check-in Notes" value=p.monthly_check_in_notes.clone()/>
                    <InfoField label="Manager Feedback" value=p.manager_feedback.clone()/>
                    <InfoField label="Improvement Areas" value=p.improvement_areas.clone()/>
                    <InfoField label="Recognition & Rewards" value=p.recognition_rewards.clone()/>
                </div>
            }
            .into_view()
        }
    }
}

/// Browsers can only render PDFs inline
fn is_pdf(path: &str) -> bool {
    path.rsplit_once('.')
        .map_or(false, |(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

#[component]
fn CvActions(path: String) -> impl IntoView {
    let (previewing, set_previewing) = create_signal(false);
    let url = file_url(&path);
    let preview = if is_pdf(&path) {
        view! { <iframe class="cv-frame" src=url.clone() title="CV Preview"></iframe> }.into_view()
    } else {
        view! {
            <p class="cv-notice">
                "Preview is only available for PDF files. Please download the CV to view it."
            </p>
        }
        .into_view()
    };

    view! {
        <div class="cv-actions">
            <button type="button" class="btn btn-secondary" on:click=move |_| set_previewing.update(|p| *p = !*p)>
                "View CV"
            </button>
            <a class="btn btn-primary" href=url download="" target="_blank">"Download CV"</a>
            <div class="modal-overlay" class:hidden=move || !previewing.get()>
                <div class="modal">
                    <div class="modal-header">
                        <h3>"CV Preview"</h3>
                        <button type="button" class="btn btn-secondary" on:click=move |_| set_previewing.set(false)>
                            "Close"
                        </button>
                    </div>
                    {preview}
                </div>
            </div>
        </div>
    }
}

#[component]
fn InfoField(label: &'static str, value: String) -> impl IntoView {
    let value = if value.trim().is_empty() { "N/A".to_string() } else { value };
    view! {
        <div class="info-field">
            <p class="info-label">{label}</p>
            <p class="info-value">{value}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pdfs_preview_inline() {
        assert!(is_pdf("cv/EMP001_resume.pdf"));
        assert!(is_pdf("cv/EMP002.PDF"));
        assert!(!is_pdf("cv/EMP003.docx"));
        assert!(!is_pdf("cv/pdf"));
    }
}
