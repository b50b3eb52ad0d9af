//! Activity model.
//!
//! An activity is the smallest schedulable unit of work in a project. It
//! has a fixed duration, a per-resource demand vector, and precedence
//! links to other activities. Activities live in an arena owned by
//! [`ProjectModel`](super::ProjectModel) and are addressed by dense id.
//!
//! # Reference
//! Kolisch & Hartmann (1999), "Heuristic Algorithms for Solving the
//! Resource-Constrained Project Scheduling Problem", Sec. 2

use serde::{Deserialize, Serialize};

/// Dense activity identifier. `0` is the dummy start, `J + 1` the dummy end.
pub type ActivityId = usize;

/// Integral time unit used for durations, starts and the horizon.
pub type Time = usize;

/// An activity (job) to be scheduled.
///
/// Precedence lists are dummy-inclusive: real activities without real
/// predecessors normally list `0` as predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Processing time.
    pub duration: Time,
    /// Units required of each renewable resource while in process.
    pub demand: Vec<u32>,
    /// Immediate predecessors.
    pub predecessors: Vec<ActivityId>,
    /// Immediate successors.
    pub successors: Vec<ActivityId>,
}

impl Activity {
    /// Creates a zero-duration activity with zero demand on `num_resources` resources.
    pub fn new(num_resources: usize) -> Self {
        Self {
            duration: 0,
            demand: vec![0; num_resources],
            predecessors: Vec::new(),
            successors: Vec::new(),
        }
    }

    /// Sets the duration.
    pub fn with_duration(mut self, duration: Time) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the demand vector.
    pub fn with_demand(mut self, demand: Vec<u32>) -> Self {
        self.demand = demand;
        self
    }

    /// Total units demanded across all resources.
    pub fn total_demand(&self) -> u64 {
        self.demand.iter().map(|&d| d as u64).sum()
    }

    /// Whether this activity consumes no time and no resources.
    pub fn is_trivial(&self) -> bool {
        self.duration == 0 && self.demand.iter().all(|&d| d == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_builder() {
        let act = Activity::new(2).with_duration(5).with_demand(vec![3, 1]);

        assert_eq!(act.duration, 5);
        assert_eq!(act.demand, vec![3, 1]);
        assert_eq!(act.total_demand(), 4);
        assert!(act.predecessors.is_empty());
        assert!(!act.is_trivial());
    }

    #[test]
    fn test_new_activity_is_trivial() {
        let act = Activity::new(3);
        assert_eq!(act.demand.len(), 3);
        assert!(act.is_trivial());
    }
}
