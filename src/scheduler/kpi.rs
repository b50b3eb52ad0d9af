//! Schedule quality metrics (KPIs).
//!
//! Computes standard project scheduling performance indicators from a
//! decoded schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Start of the dummy end |
//! | Critical path (LB0) | Longest precedence path, ignoring resources |
//! | Gap to LB0 | (C_max - LB0) / LB0 |
//! | Avg Utilization | Mean booked fraction of capacity over C_max |
//! | Avg Slack | Mean (LS - start) over real activities |
//!
//! # Reference
//! Kolisch & Hartmann (2006), "Experimental investigation of heuristics for
//! resource-constrained project scheduling: An update"

use crate::models::{ProjectModel, Schedule, Time};
use crate::preprocess::ProjectAnalysis;

/// Schedule performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Project completion time.
    pub makespan: Time,
    /// Critical-path lower bound.
    pub critical_path: Time,
    /// Relative deviation from the critical-path bound (0.0 = on the bound).
    pub gap_to_critical_path: f64,
    /// Average resource utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Per-resource utilization, indexed like `ProjectModel::resources`.
    pub utilization_by_resource: Vec<f64>,
    /// Mean remaining float to the latest start, over real activities.
    pub avg_slack: f64,
}

impl ScheduleKpi {
    /// Computes KPIs for a schedule of `project`.
    pub fn calculate(
        schedule: &Schedule,
        project: &ProjectModel,
        analysis: &ProjectAnalysis,
    ) -> Self {
        let makespan = schedule.makespan();
        let critical_path = analysis.critical_path_length();
        let gap_to_critical_path = if critical_path == 0 {
            0.0
        } else {
            (makespan as f64 - critical_path as f64) / critical_path as f64
        };

        let utilization_by_resource: Vec<f64> = (0..project.num_resources())
            .map(|k| schedule.resource_utilization(project, k).unwrap_or(0.0))
            .collect();
        let avg_utilization = if utilization_by_resource.is_empty() {
            0.0
        } else {
            utilization_by_resource.iter().sum::<f64>() / utilization_by_resource.len() as f64
        };

        let jobs = project.num_jobs();
        let avg_slack = if jobs == 0 {
            0.0
        } else {
            let total: f64 = project
                .real_activities()
                .map(|j| {
                    let latest_start =
                        analysis.latest_finish(j).saturating_sub(project.duration(j));
                    latest_start as f64 - schedule.start_of(j) as f64
                })
                .sum();
            total / jobs as f64
        };

        Self {
            makespan,
            critical_path,
            gap_to_critical_path,
            avg_utilization,
            utilization_by_resource,
            avg_slack,
        }
    }

    /// Whether the schedule is within `max_gap` of the critical-path bound.
    pub fn meets_gap(&self, max_gap: f64) -> bool {
        self.gap_to_critical_path <= max_gap
    }
}
