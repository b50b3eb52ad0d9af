//! Project model.
//!
//! A project is a set of `J` real activities framed by two sentinels: the
//! dummy start `0` and the dummy end `J + 1`. Both sentinels have zero
//! duration and zero demand. The model is immutable once handed to the
//! preprocessor.
//!
//! # Reference
//! Kolisch & Sprecher (1997), "PSPLIB - A project scheduling problem library"

use serde::{Deserialize, Serialize};

use super::{Activity, ActivityId, Resource, Time};

/// A single-mode RCPSP instance.
///
/// # Example
/// ```
/// use u_rcpsp::models::{ProjectModel, Resource};
///
/// let project = ProjectModel::new(2, vec![Resource::renewable(2)], 10)
///     .with_activity(1, 3, vec![1])
///     .with_activity(2, 2, vec![2])
///     .with_precedence(1, 2)
///     .connect_dummies();
///
/// assert_eq!(project.num_jobs(), 2);
/// assert_eq!(project.end_id(), 3);
/// assert_eq!(project.predecessors(1), &[0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectModel {
    /// Activity arena indexed by id, sentinels included (`J + 2` entries).
    pub activities: Vec<Activity>,
    /// Renewable resources.
    pub resources: Vec<Resource>,
    /// Upper bound on any completion time.
    pub horizon: Time,
}

impl ProjectModel {
    /// Creates a project with `num_jobs` empty real activities.
    pub fn new(num_jobs: usize, resources: Vec<Resource>, horizon: Time) -> Self {
        let k = resources.len();
        Self {
            activities: vec![Activity::new(k); num_jobs + 2],
            resources,
            horizon,
        }
    }

    /// Sets duration and demand of an activity.
    pub fn with_activity(mut self, id: ActivityId, duration: Time, demand: Vec<u32>) -> Self {
        let act = &mut self.activities[id];
        act.duration = duration;
        act.demand = demand;
        self
    }

    /// Adds the precedence edge `from → to` to both adjacency lists.
    ///
    /// Duplicate edges are ignored.
    pub fn with_precedence(mut self, from: ActivityId, to: ActivityId) -> Self {
        self.add_precedence(from, to);
        self
    }

    /// Sets the horizon.
    pub fn with_horizon(mut self, horizon: Time) -> Self {
        self.horizon = horizon;
        self
    }

    /// Links every real activity without predecessors to the dummy start and
    /// every real activity without successors to the dummy end.
    pub fn connect_dummies(mut self) -> Self {
        let end = self.end_id();
        for j in 1..end {
            if self.activities[j].predecessors.is_empty() {
                self.add_precedence(0, j);
            }
            if self.activities[j].successors.is_empty() {
                self.add_precedence(j, end);
            }
        }
        if end > 0 && self.activities[0].successors.is_empty() {
            self.add_precedence(0, end);
        }
        self
    }

    fn add_precedence(&mut self, from: ActivityId, to: ActivityId) {
        if !self.activities[from].successors.contains(&to) {
            self.activities[from].successors.push(to);
        }
        if !self.activities[to].predecessors.contains(&from) {
            self.activities[to].predecessors.push(from);
        }
    }

    /// Number of real activities (`J`).
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.activities.len().saturating_sub(2)
    }

    /// Number of resources (`K`).
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.resources.len()
    }

    /// Total number of activities including sentinels (`J + 2`).
    #[inline]
    pub fn num_activities(&self) -> usize {
        self.activities.len()
    }

    /// Id of the dummy end activity (`J + 1`).
    #[inline]
    pub fn end_id(&self) -> ActivityId {
        self.activities.len().saturating_sub(1)
    }

    /// Whether `id` is a real (non-sentinel) activity.
    #[inline]
    pub fn is_real(&self, id: ActivityId) -> bool {
        id >= 1 && id <= self.num_jobs()
    }

    /// Ids of the real activities, `1..=J`.
    pub fn real_activities(&self) -> impl Iterator<Item = ActivityId> {
        1..=self.num_jobs()
    }

    #[inline]
    pub fn duration(&self, id: ActivityId) -> Time {
        self.activities[id].duration
    }

    #[inline]
    pub fn demand(&self, id: ActivityId, resource: usize) -> u32 {
        self.activities[id].demand[resource]
    }

    #[inline]
    pub fn capacity(&self, resource: usize) -> u32 {
        self.resources[resource].capacity
    }

    #[inline]
    pub fn predecessors(&self, id: ActivityId) -> &[ActivityId] {
        &self.activities[id].predecessors
    }

    #[inline]
    pub fn successors(&self, id: ActivityId) -> &[ActivityId] {
        &self.activities[id].successors
    }

    /// Sum of all durations, the trivial horizon of a serial schedule.
    pub fn sum_of_durations(&self) -> Time {
        self.activities.iter().map(|a| a.duration).sum()
    }
}
