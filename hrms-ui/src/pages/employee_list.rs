use crate::auth::use_auth;
use crate::error::{EmptyState, LoadingError};
use hrms_common::employee::{departments, EmployeeFilter, EmployeeSummary, EmploymentStatus};
use hrms_common::routes::{self, employee_profile_path};
use leptos::*;
use leptos_router::A;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Table,
    Cards,
}

/// Select value standing for "no filter"
const ALL: &str = "All";

#[component]
pub fn EmployeeList() -> impl IntoView {
    let auth = use_auth();
    let employees = create_local_resource(|| (), move |_| async move { auth.client().list_employees().await });

    let (search, set_search) = create_signal(String::new());
    let (department, set_department) = create_signal(ALL.to_string());
    let (status, set_status) = create_signal(ALL.to_string());
    let (view_mode, set_view_mode) = create_signal(ViewMode::Table);

    let filter = move || EmployeeFilter {
        search: search.get(),
        department: Some(department.get()).filter(|d| d != ALL),
        status: EmploymentStatus::ALL
            .into_iter()
            .find(|s| s.as_str() == status.get()),
    };

    view! {
        <div class="employee-list">
            <div class="page-header">
                <h1>"Employee Directory"</h1>
                <div class="header-actions">
                    <button
                        class=move || if view_mode.get() == ViewMode::Table { "btn-icon active" } else { "btn-icon" }
                        title="Table view"
                        on:click=move |_| set_view_mode.set(ViewMode::Table)
                    >
                        "☰"
                    </button>
                    <button
                        class=move || if view_mode.get() == ViewMode::Cards { "btn-icon active" } else { "btn-icon" }
                        title="Card view"
                        on:click=move |_| set_view_mode.set(ViewMode::Cards)
                    >
                        "▦"
                    </button>
                    <Show when=move || auth.has_role(routes::EMPLOYEE_EDITORS)>
                        <A href=routes::ADD_EMPLOYEE class="btn btn-primary">"+ Add Employee"</A>
                    </Show>
                </div>
            </div>

            <Suspense fallback=move || view! { <p>"Loading employees..."</p> }>
                {move || employees.get().map(|result| match result {
                    Err(error) => view! {
                        <LoadingError error=error on_retry=Callback::new(move |_| employees.refetch())/>
                    }
                    .into_view(),
                    Ok(list) => {
                        let teams = departments(&list);
                        let list = store_value(list);
                        let visible = move || {
                            let filter = filter();
                            list.with_value(|all| filter.apply(all).into_iter().cloned().collect::<Vec<_>>())
                        };

                        view! {
                            <div class="filters">
                                <input
                                    type="search"
                                    placeholder="Search by name or employee code"
                                    prop:value=search
                                    on:input=move |ev| set_search.set(event_target_value(&ev))
                                />
                                <select on:change=move |ev| set_department.set(event_target_value(&ev))>
                                    <option value=ALL selected=move || department.get() == ALL>"All Departments"</option>
                                    {teams.into_iter().map(|team| {
                                        let value = team.clone();
                                        view! {
                                            <option value=team.clone() selected=move || department.get() == value>{team}</option>
                                        }
                                    }).collect_view()}
                                </select>
                                <select on:change=move |ev| set_status.set(event_target_value(&ev))>
                                    <option value=ALL selected=move || status.get() == ALL>"All Statuses"</option>
                                    {EmploymentStatus::ALL.into_iter().map(|s| view! {
                                        <option value=s.as_str() selected=move || status.get() == s.as_str()>{s.as_str()}</option>
                                    }).collect_view()}
                                </select>
                                <span class="result-count">
                                    {move || format!("{} of {} employees", visible().len(), list.with_value(Vec::len))}
                                </span>
                            </div>

                            {move || {
                                let rows = visible();
                                if rows.is_empty() {
                                    view! {
                                        <EmptyState
                                            icon="🔍"
                                            title="No employees found".to_string()
                                            description="Try adjusting the search or filters.".to_string()
                                        />
                                    }
                                    .into_view()
                                } else if view_mode.get() == ViewMode::Table {
                                    view! { <EmployeeTable rows=rows/> }.into_view()
                                } else {
                                    view! { <EmployeeCards rows=rows/> }.into_view()
                                }
                            }}
                        }
                        .into_view()
                    }
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn EmployeeTable(rows: Vec<EmployeeSummary>) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Code"</th>
                    <th>"Name"</th>
                    <th>"Department"</th>
                    <th>"Designation"</th>
                    <th>"Manager"</th>
                    <th>"Location"</th>
                    <th>"Status"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|e| view! {
                    <tr>
                        <td>{e.employee_code.clone()}</td>
                        <td>{e.name}</td>
                        <td>{e.team}</td>
                        <td>{e.designation}</td>
                        <td>{e.reporting_manager}</td>
                        <td>{e.location}</td>
                        <td><StatusBadge status=e.employment_status/></td>
                        <td>
                            <A href=employee_profile_path(&e.employee_code) class="btn-sm btn-secondary">"View"</A>
                        </td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn EmployeeCards(rows: Vec<EmployeeSummary>) -> impl IntoView {
    view! {
        <div class="card-grid">
            {rows.into_iter().map(|e| view! {
                <A href=employee_profile_path(&e.employee_code) class="employee-card">
                    <div class="employee-card-header">
                        <div class="avatar">{e.name.chars().next().map(String::from).unwrap_or_default()}</div>
                        <div>
                            <h3>{e.name.clone()}</h3>
                            <p class="muted">{e.employee_code.clone()}</p>
                        </div>
                        <StatusBadge status=e.employment_status/>
                    </div>
                    <p>"💼 "{e.designation}</p>
                    <p>"🏢 "{e.team}</p>
                    <p>"📍 "{e.location}</p>
                    <p>"✉ "{e.email_id}</p>
                </A>
            }).collect_view()}
        </div>
    }
}

#[component]
fn StatusBadge(status: EmploymentStatus) -> impl IntoView {
    let class = match status {
        EmploymentStatus::Active => "badge badge-success",
        EmploymentStatus::Exited => "badge badge-muted",
    };
    view! { <span class=class>{status.as_str()}</span> }
}
