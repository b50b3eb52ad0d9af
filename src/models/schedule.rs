//! Schedule (solution) model.
//!
//! A schedule fixes a start time for every activity of a project,
//! sentinels included. The makespan is the start time of the dummy end.
//! [`Schedule::violations`] re-checks a schedule against the project
//! independently of the generator that produced it.
//!
//! # Reference
//! Kolisch & Hartmann (1999), Sec. 3: schedule representation

use serde::{Deserialize, Serialize};

use super::{ActivityId, ProjectModel, Time};

/// Start and finish times for activities `0..=J+1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Start time per activity id.
    pub start: Vec<Time>,
    /// Finish time per activity id.
    pub finish: Vec<Time>,
}

/// A constraint violation found by [`Schedule::violations`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Activity (for precedence/horizon) or resource index (for capacity).
    pub entity: usize,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Resource usage above capacity at some instant.
    CapacityExceeded,
    /// Activity started before a predecessor finished.
    PrecedenceViolation,
    /// Activity finishes after the project horizon.
    HorizonExceeded,
    /// Start/finish vectors do not match the project's activities.
    Malformed,
}

impl Violation {
    fn new(violation_type: ViolationType, entity: usize, message: String) -> Self {
        Self {
            violation_type,
            entity,
            message,
        }
    }
}

impl Schedule {
    /// Creates a schedule from start times, deriving finish times from durations.
    pub fn from_starts(project: &ProjectModel, start: Vec<Time>) -> Self {
        let finish = start
            .iter()
            .enumerate()
            .map(|(j, &s)| s + project.duration(j))
            .collect();
        Self { start, finish }
    }

    /// Project completion time, the start of the dummy end.
    pub fn makespan(&self) -> Time {
        self.start.last().copied().unwrap_or(0)
    }

    #[inline]
    pub fn start_of(&self, id: ActivityId) -> Time {
        self.start[id]
    }

    #[inline]
    pub fn finish_of(&self, id: ActivityId) -> Time {
        self.finish[id]
    }

    /// Activities in process at instant `t` (`start <= t < finish`).
    pub fn active_at(&self, t: Time) -> Vec<ActivityId> {
        (0..self.start.len())
            .filter(|&j| self.start[j] <= t && t < self.finish[j])
            .collect()
    }

    /// Units of `resource` in use at each instant `0..makespan`.
    pub fn resource_profile(&self, project: &ProjectModel, resource: usize) -> Vec<u64> {
        let mut profile = vec![0u64; self.makespan()];
        for j in 0..self.start.len() {
            let demand = project.demand(j, resource) as u64;
            if demand == 0 {
                continue;
            }
            for slot in profile
                .iter_mut()
                .take(self.finish[j])
                .skip(self.start[j])
            {
                *slot += demand;
            }
        }
        profile
    }

    /// Checks precedence, capacity and horizon constraints.
    ///
    /// Returns every violation found; an empty vector means the schedule is
    /// feasible for `project`.
    pub fn violations(&self, project: &ProjectModel) -> Vec<Violation> {
        let n = project.num_activities();
        if self.start.len() != n || self.finish.len() != n {
            return vec![Violation::new(
                ViolationType::Malformed,
                0,
                format!(
                    "expected {n} activities, got {} starts and {} finishes",
                    self.start.len(),
                    self.finish.len()
                ),
            )];
        }

        let mut out = Vec::new();
        for j in 0..n {
            for &p in project.predecessors(j) {
                if self.finish[p] > self.start[j] {
                    out.push(Violation::new(
                        ViolationType::PrecedenceViolation,
                        j,
                        format!(
                            "activity {j} starts at {} before predecessor {p} finishes at {}",
                            self.start[j], self.finish[p]
                        ),
                    ));
                }
            }
            if self.finish[j] > project.horizon {
                out.push(Violation::new(
                    ViolationType::HorizonExceeded,
                    j,
                    format!(
                        "activity {j} finishes at {} after horizon {}",
                        self.finish[j], project.horizon
                    ),
                ));
            }
        }

        for k in 0..project.num_resources() {
            let capacity = project.capacity(k) as u64;
            if let Some((t, &used)) = self
                .resource_profile(project, k)
                .iter()
                .enumerate()
                .find(|&(_, &used)| used > capacity)
            {
                out.push(Violation::new(
                    ViolationType::CapacityExceeded,
                    k,
                    format!("resource {k} uses {used} of {capacity} units at t={t}"),
                ));
            }
        }
        out
    }

    /// Whether the schedule has no violations.
    pub fn is_feasible(&self, project: &ProjectModel) -> bool {
        self.violations(project).is_empty()
    }

    /// Busy fraction of `resource` over the makespan.
    ///
    /// Returns `None` if the makespan or the capacity is zero.
    pub fn resource_utilization(&self, project: &ProjectModel, resource: usize) -> Option<f64> {
        let makespan = self.makespan();
        let capacity = project.capacity(resource);
        if makespan == 0 || capacity == 0 {
            return None;
        }
        let used: u64 = self.resource_profile(project, resource).iter().sum();
        Some(used as f64 / (makespan as f64 * capacity as f64))
    }
}
