use serde::Serialize;

use crate::models::{Category, Complaint, Status};

/// Per-category dashboard figures, compared against the category's
/// resolution-latency target.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
    pub avg_resolution_hours: f64,
    pub target_hours: f64,
    pub meeting_target: bool,
}

/// Figures over an already-filtered (visible) set, without a target.
#[derive(Debug, Clone, Serialize)]
pub struct ScopeStats {
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
    pub avg_resolution_hours: f64,
}

/// Mean resolution latency in hours over the Resolved complaints of the set.
/// Explicitly 0.0 when nothing is resolved, never NaN.
fn avg_resolution_hours(complaints: &[Complaint]) -> f64 {
    let durations: Vec<f64> = complaints
        .iter()
        .filter(|c| c.status == Status::Resolved)
        .filter_map(|c| c.resolved_at.map(|end| (end - c.timestamp).num_milliseconds()))
        .map(|ms| ms as f64 / 3_600_000.0)
        .collect();

    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().sum::<f64>() / durations.len() as f64
}

pub fn scope_stats(complaints: &[Complaint]) -> ScopeStats {
    ScopeStats {
        total: complaints.len(),
        pending: complaints.iter().filter(|c| c.status == Status::Pending).count(),
        resolved: complaints.iter().filter(|c| c.status == Status::Resolved).count(),
        avg_resolution_hours: avg_resolution_hours(complaints),
    }
}

pub fn category_stats(complaints: &[Complaint], category: Category) -> CategoryStats {
    let in_category: Vec<Complaint> = complaints
        .iter()
        .filter(|c| c.category == category)
        .cloned()
        .collect();

    let base = scope_stats(&in_category);
    let target_hours = category.target_hours();
    CategoryStats {
        category,
        total: base.total,
        pending: base.pending,
        resolved: base.resolved,
        avg_resolution_hours: base.avg_resolution_hours,
        target_hours,
        meeting_target: base.avg_resolution_hours <= target_hours,
    }
}

/// Per-category buckets over the whole store, for the executive chart.
pub fn overview(complaints: &[Complaint]) -> Vec<CategoryStats> {
    Category::ALL
        .iter()
        .map(|&category| category_stats(complaints, category))
        .collect()
}
