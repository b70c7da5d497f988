use crate::auth::use_auth;
use crate::error::{EmptyState, LoadingError};
use hrms_common::dashboard::{relative_widths, CountBucket, DashboardStats};
use hrms_common::routes;
use leptos::*;
use leptos_router::A;

#[component]
pub fn Dashboard() -> impl IntoView {
    let auth = use_auth();
    let stats = create_local_resource(|| (), move |_| async move { auth.client().dashboard_stats().await });

    view! {
        <div class="dashboard">
            <div class="page-header">
                <h1>"Dashboard"</h1>
                <p>"Overview of the workforce"</p>
            </div>

            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || stats.get().map(|result| match result {
                    Ok(data) => view! { <DashboardBody stats=data/> }.into_view(),
                    Err(error) => view! {
                        <LoadingError error=error on_retry=Callback::new(move |_| stats.refetch())/>
                    }
                    .into_view(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn DashboardBody(stats: DashboardStats) -> impl IntoView {
    let retention = format!("{:.1}% retention", stats.retention_rate());
    let hiring: Vec<CountBucket> = stats
        .hiring_trend
        .iter()
        .map(|point| CountBucket {
            name: point.year.to_string(),
            count: point.hires,
        })
        .collect();

    view! {
        <div class="stats-grid">
            <StatCard icon="👥" title="Total Employees" value=stats.total_employees.to_string() label="All records".to_string() link=routes::EMPLOYEES/>
            <StatCard icon="✅" title="Active" value=stats.active.to_string() label=retention link=routes::EMPLOYEES/>
            <StatCard icon="🚪" title="Exited" value=stats.exited.to_string() label="Former employees".to_string() link=routes::EMPLOYEES/>
            <StatCard icon="🏢" title="Departments" value=stats.departments.to_string() label="Teams".to_string() link=routes::EMPLOYEES/>
        </div>

        <div class="charts-grid">
            <BarList title="Department Distribution" buckets=stats.department_breakdown/>
            <BarList title="Employment Status" buckets=stats.employment_status/>
            <BarList title="Top Skills" buckets=stats.skills/>
            <BarList title="Hiring Trend" buckets=hiring/>
            <BarList title="Location Distribution" buckets=stats.locations/>
        </div>

        <div class="card">
            <h2>"Recent Hires"</h2>
            {if stats.recent_hires.is_empty() {
                view! {
                    <EmptyState title="No recent hires".to_string() description="New joiners will appear here.".to_string()/>
                }
                .into_view()
            } else {
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Department"</th>
                                <th>"Designation"</th>
                                <th>"Joined"</th>
                                <th>"Location"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {stats.recent_hires.into_iter().map(|hire| view! {
                                <tr>
                                    <td>{hire.name}</td>
                                    <td>{hire.team}</td>
                                    <td>{hire.designation}</td>
                                    <td>{hire.doj}</td>
                                    <td>{hire.location}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                }
                .into_view()
            }}
        </div>
    }
}

#[component]
fn StatCard(
    icon: &'static str,
    title: &'static str,
    value: String,
    label: String,
    link: &'static str,
) -> impl IntoView {
    view! {
        <A href=link class="stat-card">
            <div class="stat-icon">{icon}</div>
            <div class="stat-content">
                <h3>{title}</h3>
                <p class="stat-value">{value}</p>
                <p class="stat-label">{label}</p>
            </div>
        </A>
    }
}

/// Horizontal bars scaled to the largest bucket
#[component]
fn BarList(title: &'static str, buckets: Vec<CountBucket>) -> impl IntoView {
    let widths = relative_widths(&buckets);

    view! {
        <div class="card bar-list">
            <h3>{title}</h3>
            {buckets
                .into_iter()
                .zip(widths)
                .map(|(bucket, width)| view! {
                    <div class="bar-row">
                        <span class="bar-label">{bucket.name}</span>
                        <div class="bar-track">
                            <div class="bar-fill" style=format!("width: {:.1}%", width)></div>
                        </div>
                        <span class="bar-count">{bucket.count}</span>
                    </div>
                })
                .collect_view()}
        </div>
    }
}
