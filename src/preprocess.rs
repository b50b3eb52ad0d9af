//! Precedence-graph preprocessing.
//!
//! Derives, once per project, everything the list operators and the
//! decoder need from the precedence DAG:
//!
//! - a deterministic topological order (Kahn's algorithm)
//! - the transitive predecessor closure as one bitset per activity,
//!   giving O(1) ancestor queries
//! - precedence-only earliest start times (forward CPM pass)
//! - precedence-only latest finish times (backward CPM pass)
//!
//! # Reference
//! Kelley (1961), "Critical-Path Planning and Scheduling: Mathematical Basis"

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::error::{RcpspError, Result};
use crate::models::{ActivityId, ProjectModel, Time};
use crate::validation::validate_project;

/// Cached structural data derived from a [`ProjectModel`].
///
/// Rebuild it whenever the project changes; it holds no reference to the
/// project itself.
#[derive(Debug, Clone)]
pub struct ProjectAnalysis {
    topological_order: Vec<ActivityId>,
    topological_index: Vec<usize>,
    predecessor_closure: Vec<FixedBitSet>,
    earliest_start: Vec<Time>,
    latest_finish: Vec<Time>,
    transitive_successors: Vec<usize>,
}

impl ProjectAnalysis {
    /// Validates the project and runs all preprocessing passes.
    ///
    /// # Errors
    /// - [`RcpspError::InvalidProject`] if structural validation fails
    /// - [`RcpspError::CycleDetected`] if the topological sort stalls
    pub fn new(project: &ProjectModel) -> Result<Self> {
        validate_project(project).map_err(RcpspError::InvalidProject)?;

        let topological_order = topological_sort(project)?;
        let mut topological_index = vec![0; topological_order.len()];
        for (pos, &id) in topological_order.iter().enumerate() {
            topological_index[id] = pos;
        }

        let predecessor_closure = transitive_closure(project, &topological_order);
        let earliest_start = forward_pass(project, &topological_order);
        let latest_finish = backward_pass(project, &topological_order);

        let n = project.num_activities();
        let mut transitive_successors = vec![0; n];
        for closure in &predecessor_closure {
            for ancestor in closure.ones() {
                transitive_successors[ancestor] += 1;
            }
        }

        Ok(Self {
            topological_order,
            topological_index,
            predecessor_closure,
            earliest_start,
            latest_finish,
            transitive_successors,
        })
    }

    /// Activities `0..=J+1` in topological order.
    pub fn topological_order(&self) -> &[ActivityId] {
        &self.topological_order
    }

    /// Position of `id` in the topological order.
    #[inline]
    pub fn topological_index(&self, id: ActivityId) -> usize {
        self.topological_index[id]
    }

    /// All transitive predecessors of `id`.
    #[inline]
    pub fn predecessor_closure(&self, id: ActivityId) -> &FixedBitSet {
        &self.predecessor_closure[id]
    }

    /// Whether a directed path `ancestor → id` exists.
    #[inline]
    pub fn is_ancestor(&self, ancestor: ActivityId, id: ActivityId) -> bool {
        self.predecessor_closure[id].contains(ancestor)
    }

    /// Precedence-only earliest start of `id`.
    #[inline]
    pub fn earliest_start(&self, id: ActivityId) -> Time {
        self.earliest_start[id]
    }

    /// Precedence-only latest finish of `id` relative to the horizon.
    #[inline]
    pub fn latest_finish(&self, id: ActivityId) -> Time {
        self.latest_finish[id]
    }

    /// Number of activities that transitively depend on `id`.
    #[inline]
    pub fn transitive_successors(&self, id: ActivityId) -> usize {
        self.transitive_successors[id]
    }

    /// Length of the longest precedence path, a lower bound on the makespan.
    pub fn critical_path_length(&self) -> Time {
        self.earliest_start.last().copied().unwrap_or(0)
    }
}

/// Kahn's algorithm. Ready nodes are released in ascending id order.
fn topological_sort(project: &ProjectModel) -> Result<Vec<ActivityId>> {
    let n = project.num_activities();
    let mut in_degree: Vec<usize> = (0..n).map(|j| project.predecessors(j).len()).collect();
    let mut ready: VecDeque<ActivityId> = (0..n).filter(|&j| in_degree[j] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(id) = ready.pop_front() {
        order.push(id);
        for &s in project.successors(id) {
            in_degree[s] -= 1;
            if in_degree[s] == 0 {
                ready.push_back(s);
            }
        }
    }

    if order.len() < n {
        return Err(RcpspError::CycleDetected {
            placed: order.len(),
            expected: n,
        });
    }
    Ok(order)
}

/// closure(j) = ∪ over immediate predecessors p of ({p} ∪ closure(p)).
///
/// Visiting in topological order guarantees each predecessor's closure is
/// final before it is merged, so every node is computed exactly once.
fn transitive_closure(project: &ProjectModel, order: &[ActivityId]) -> Vec<FixedBitSet> {
    let n = project.num_activities();
    let mut closure = vec![FixedBitSet::with_capacity(n); n];
    for &j in order {
        let mut acc = FixedBitSet::with_capacity(n);
        for &p in project.predecessors(j) {
            acc.insert(p);
            acc.union_with(&closure[p]);
        }
        closure[j] = acc;
    }
    closure
}

fn forward_pass(project: &ProjectModel, order: &[ActivityId]) -> Vec<Time> {
    let mut es = vec![0; project.num_activities()];
    for &j in order {
        es[j] = project
            .predecessors(j)
            .iter()
            .map(|&p| es[p] + project.duration(p))
            .max()
            .unwrap_or(0);
    }
    es
}

/// `LF[J+1] = horizon`, `LF[j] = min over successors s of (LF[s] - d[s])`.
///
/// Saturates at zero when the horizon is shorter than the critical path.
fn backward_pass(project: &ProjectModel, order: &[ActivityId]) -> Vec<Time> {
    let mut lf = vec![project.horizon; project.num_activities()];
    for &j in order.iter().rev() {
        if let Some(min) = project
            .successors(j)
            .iter()
            .map(|&s| lf[s].saturating_sub(project.duration(s)))
            .min()
        {
            lf[j] = min;
        }
    }
    lf
}
