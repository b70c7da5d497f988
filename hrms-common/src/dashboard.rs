///! Dashboard aggregates (`GET /api/dashboard/stats`)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_employees: u32,
    pub active: u32,
    pub exited: u32,
    pub departments: u32,
    pub department_breakdown: Vec<CountBucket>,
    pub employment_status: Vec<CountBucket>,
    pub skills: Vec<CountBucket>,
    pub hiring_trend: Vec<HiringPoint>,
    pub locations: Vec<CountBucket>,
    pub recent_hires: Vec<RecentHire>,
}

/// One labelled count in a chart series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBucket {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringPoint {
    pub year: i32,
    pub hires: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentHire {
    pub name: String,
    pub team: String,
    pub designation: String,
    pub doj: String,
    pub location: String,
}

impl DashboardStats {
    /// Share of active employees, in percent
    pub fn retention_rate(&self) -> f64 {
        if self.total_employees == 0 {
            return 0.0;
        }
        self.active as f64 / self.total_employees as f64 * 100.0
    }
}

/// Bar widths in percent of the largest bucket
pub fn relative_widths(buckets: &[CountBucket]) -> Vec<f64> {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    buckets
        .iter()
        .map(|b| {
            if max == 0 {
                0.0
            } else {
                b.count as f64 / max as f64 * 100.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(name: &str, count: u32) -> CountBucket {
        CountBucket { name: name.to_string(), count }
    }

    #[test]
    fn test_retention_rate() {
        let stats = DashboardStats {
            total_employees: 142,
            active: 128,
            exited: 14,
            ..Default::default()
        };
        assert!((stats.retention_rate() - 90.14).abs() < 0.01);
        assert_eq!(DashboardStats::default().retention_rate(), 0.0);
    }

    #[test]
    fn test_relative_widths() {
        let widths = relative_widths(&[bucket("Engineering", 45), bucket("HR", 9), bucket("Empty", 0)]);
        assert_eq!(widths, vec![100.0, 20.0, 0.0]);
        assert!(relative_widths(&[bucket("a", 0)]).iter().all(|w| *w == 0.0));
        assert!(relative_widths(&[]).is_empty());
    }

    #[test]
    fn test_partial_payload_parses() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"total_employees":10,"active":9,"exited":1}"#).unwrap();
        assert_eq!(stats.departments, 0);
        assert!(stats.recent_hires.is_empty());
    }
}
