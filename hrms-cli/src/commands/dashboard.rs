use super::authorize_route;
use crate::api::ApiClient;
use crate::output::{self, OutputFormat};
use crate::session::FileStore;
use anyhow::Result;
use colored::Colorize;
use hrms_common::dashboard::{relative_widths, CountBucket, DashboardStats, RecentHire};
use hrms_common::routes;
use hrms_common::AuthPolicy;
use tabled::Tabled;

const BAR_WIDTH: usize = 30;

#[derive(Tabled)]
struct HireRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DEPARTMENT")]
    team: String,
    #[tabled(rename = "DESIGNATION")]
    designation: String,
    #[tabled(rename = "JOINED")]
    doj: String,
    #[tabled(rename = "LOCATION")]
    location: String,
}

impl From<RecentHire> for HireRow {
    fn from(h: RecentHire) -> Self {
        Self {
            name: h.name,
            team: h.team,
            designation: h.designation,
            doj: h.doj,
            location: h.location,
        }
    }
}

pub async fn handle_dashboard_command(
    api: &ApiClient,
    policy: &AuthPolicy<FileStore>,
    format: OutputFormat,
) -> Result<()> {
    authorize_route(policy, routes::DASHBOARD)?;
    let stats: DashboardStats = api.get("/api/dashboard/stats").await?;

    if output::print_structured(&stats, format)? {
        return Ok(());
    }

    println!("{}", "Workforce Overview".bold());
    println!("  Total employees: {}", stats.total_employees);
    println!(
        "  Active:          {} ({:.1}% retention)",
        stats.active.to_string().green(),
        stats.retention_rate()
    );
    println!("  Exited:          {}", stats.exited.to_string().red());
    println!("  Departments:     {}", stats.departments);

    print_buckets("Employees by Department", &stats.department_breakdown);
    print_buckets("Employment Status", &stats.employment_status);
    print_buckets("Top Skills", &stats.skills);
    let trend: Vec<CountBucket> = stats
        .hiring_trend
        .iter()
        .map(|p| CountBucket {
            name: p.year.to_string(),
            count: p.hires,
        })
        .collect();
    print_buckets("Hiring Trend", &trend);
    print_buckets("Locations", &stats.locations);

    println!("\n{}", "Recent Hires".bold());
    output::print_table(stats.recent_hires.into_iter().map(HireRow::from).collect());

    Ok(())
}

fn print_buckets(title: &str, buckets: &[CountBucket]) {
    println!("\n{}", title.bold());
    if buckets.is_empty() {
        println!("  {}", "no data".dimmed());
        return;
    }

    let label_width = buckets.iter().map(|b| b.name.chars().count()).max().unwrap_or(0);
    for (bucket, width) in buckets.iter().zip(relative_widths(buckets)) {
        println!(
            "  {:<label_width$}  {} {}",
            bucket.name,
            output::bar(width / 100.0, BAR_WIDTH).cyan(),
            bucket.count
        );
    }
}
