//! Activity-list operations.
//!
//! An activity list is a permutation of the real activities `1..=J`. It is
//! *precedence-feasible* when every real predecessor appears before its
//! successor. All GA operators work on such lists; the decoder turns them
//! into schedules.
//!
//! # Reference
//! Kolisch & Hartmann (1999), Sec. 4.1: activity list representation

use fixedbitset::FixedBitSet;
use rand::Rng;

use super::RcpspProblem;
use crate::error::{RcpspError, Result};
use crate::models::{ActivityId, ProjectModel};

/// Activities whose predecessors have all been placed.
///
/// Shared bookkeeping for every serial list constructor (uniform random,
/// RBRS, priority rules). The dummy start counts as placed from the
/// beginning; the dummy end is never eligible.
#[derive(Debug, Clone)]
pub struct EligibleSet<'a> {
    project: &'a ProjectModel,
    remaining: Vec<usize>,
    eligible: Vec<ActivityId>,
}

impl<'a> EligibleSet<'a> {
    /// Starts with the real activities that only depend on the dummy start.
    pub fn new(project: &'a ProjectModel) -> Self {
        let remaining: Vec<usize> = (0..project.num_activities())
            .map(|j| {
                project
                    .predecessors(j)
                    .iter()
                    .filter(|&&p| p != 0)
                    .count()
            })
            .collect();
        let eligible = project
            .real_activities()
            .filter(|&j| remaining[j] == 0)
            .collect();
        Self {
            project,
            remaining,
            eligible,
        }
    }

    /// Currently eligible activities.
    #[inline]
    pub fn eligible(&self) -> &[ActivityId] {
        &self.eligible
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.eligible.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }

    /// Places the activity at `pos` of [`eligible`](Self::eligible) and
    /// releases successors whose last predecessor it was.
    pub fn select(&mut self, pos: usize) -> ActivityId {
        let id = self.eligible.remove(pos);
        for &s in self.project.successors(id) {
            if !self.project.is_real(s) {
                continue;
            }
            self.remaining[s] -= 1;
            if self.remaining[s] == 0 {
                self.eligible.push(s);
            }
        }
        id
    }
}

/// Whether `list` is a permutation of `1..=J` in which every real
/// predecessor precedes its successors.
///
/// Runs in O(J + edges).
pub fn is_precedence_feasible(problem: &RcpspProblem, list: &[ActivityId]) -> bool {
    let project = &problem.project;
    if list.len() != project.num_jobs() {
        return false;
    }
    let mut scheduled = FixedBitSet::with_capacity(project.num_activities());
    for &j in list {
        if !project.is_real(j) || scheduled.contains(j) {
            return false;
        }
        let ready = project
            .predecessors(j)
            .iter()
            .all(|&p| !project.is_real(p) || scheduled.contains(p));
        if !ready {
            return false;
        }
        scheduled.insert(j);
    }
    true
}

/// Whether positions `i` and `i + 1` may be exchanged without breaking
/// precedence, i.e. neither activity is a transitive predecessor of the other.
#[inline]
pub fn can_swap_adjacent(problem: &RcpspProblem, list: &[ActivityId], i: usize) -> bool {
    if i + 1 >= list.len() {
        return false;
    }
    let (a, b) = (list[i], list[i + 1]);
    !problem.analysis.is_ancestor(a, b) && !problem.analysis.is_ancestor(b, a)
}

/// Moves inverted predecessors in front of their successors until the list
/// is precedence-feasible.
///
/// A feasible list is returned unchanged. Each move takes the first
/// inversion found scanning left to right and moves the predecessor to just
/// before the successor. The number of moves is bounded by `(J + 2)²`.
///
/// # Errors
/// - [`RcpspError::InfeasibleActivityList`] if `list` misses a real predecessor
///   or contains a non-real id
/// - [`RcpspError::RepairDiverged`] if the bound is exceeded
pub fn repair_activity_list(
    problem: &RcpspProblem,
    list: &[ActivityId],
) -> Result<Vec<ActivityId>> {
    let project = &problem.project;
    let n = project.num_activities();
    let limit = n * n;
    let mut list = list.to_vec();
    if list.iter().any(|&j| !project.is_real(j)) {
        return Err(RcpspError::InfeasibleActivityList);
    }

    let mut position = vec![usize::MAX; n];
    let rebuild = |list: &[ActivityId], position: &mut Vec<usize>| {
        position.iter_mut().for_each(|p| *p = usize::MAX);
        for (i, &j) in list.iter().enumerate() {
            position[j] = i;
        }
    };
    rebuild(&list, &mut position);

    let mut moves = 0;
    'scan: loop {
        for idx in 0..list.len() {
            let succ = list[idx];
            for &pred in project.predecessors(succ) {
                if !project.is_real(pred) {
                    continue;
                }
                let from = position[pred];
                if from == usize::MAX {
                    return Err(RcpspError::InfeasibleActivityList);
                }
                if from > idx {
                    if moves == limit {
                        return Err(RcpspError::RepairDiverged { iterations: moves });
                    }
                    let gene = list.remove(from);
                    list.insert(idx, gene);
                    rebuild(&list, &mut position);
                    moves += 1;
                    continue 'scan;
                }
            }
        }
        return Ok(list);
    }
}

/// Samples a precedence-feasible list uniformly from the eligible set at
/// each step.
///
/// # Errors
/// [`RcpspError::CycleDetected`] if the eligible set empties before all
/// activities are placed.
pub fn generate_random_feasible_list<R: Rng>(
    problem: &RcpspProblem,
    rng: &mut R,
) -> Result<Vec<ActivityId>> {
    let jobs = problem.num_jobs();
    let mut set = EligibleSet::new(&problem.project);
    let mut list = Vec::with_capacity(jobs);
    while list.len() < jobs {
        if set.is_empty() {
            return Err(RcpspError::CycleDetected {
                placed: list.len(),
                expected: jobs,
            });
        }
        let pos = rng.random_range(0..set.len());
        list.push(set.select(pos));
    }
    Ok(list)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{ProjectModel, Resource};
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// 1 → 3 → 5, 2 → 4 → 5, 2 → 5, 6 independent.
    pub(crate) fn sample_problem() -> RcpspProblem {
        let project = ProjectModel::new(6, vec![Resource::renewable(3)], 40)
            .with_activity(1, 3, vec![2])
            .with_activity(2, 2, vec![1])
            .with_activity(3, 4, vec![2])
            .with_activity(4, 1, vec![3])
            .with_activity(5, 2, vec![1])
            .with_activity(6, 5, vec![2])
            .with_precedence(1, 3)
            .with_precedence(3, 5)
            .with_precedence(2, 4)
            .with_precedence(4, 5)
            .with_precedence(2, 5)
            .connect_dummies();
        RcpspProblem::new(project).unwrap()
    }

    #[test]
    fn test_feasibility_check() {
        let p = sample_problem();
        assert!(is_precedence_feasible(&p, &[1, 2, 3, 4, 5, 6]));
        assert!(is_precedence_feasible(&p, &[6, 2, 4, 1, 3, 5]));
        assert!(!is_precedence_feasible(&p, &[3, 1, 2, 4, 5, 6]));
        // Wrong length, duplicates, sentinels
        assert!(!is_precedence_feasible(&p, &[1, 2, 3]));
        assert!(!is_precedence_feasible(&p, &[1, 1, 2, 3, 4, 5]));
        assert!(!is_precedence_feasible(&p, &[0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_can_swap_adjacent() {
        let p = sample_problem();
        let list = [1, 2, 3, 4, 5, 6];
        assert!(can_swap_adjacent(&p, &list, 0)); // 1, 2 unrelated
        assert!(!can_swap_adjacent(&p, &[1, 3, 2, 4, 5, 6], 0)); // 1 → 3
        assert!(!can_swap_adjacent(&p, &[2, 1, 3, 5, 4, 6], 3)); // 4 → 5
        assert!(can_swap_adjacent(&p, &list, 4)); // 5, 6 unrelated
        assert!(!can_swap_adjacent(&p, &list, 5)); // out of range
    }

    #[test]
    fn test_transitive_swap_blocked() {
        let p = sample_problem();
        // 1 → 3 → 5: 1 and 5 are related through 3
        assert!(!can_swap_adjacent(&p, &[2, 4, 1, 5, 3, 6], 2));
    }

    #[test]
    fn test_repair_fixes_inversions() {
        let p = sample_problem();
        let repaired = repair_activity_list(&p, &[5, 3, 4, 1, 6, 2]).unwrap();
        assert!(is_precedence_feasible(&p, &repaired));
        let mut sorted = repaired.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_repair_identity_on_feasible() {
        let p = sample_problem();
        let list = vec![6, 2, 4, 1, 3, 5];
        assert_eq!(repair_activity_list(&p, &list).unwrap(), list);
    }

    #[test]
    fn test_repair_rejects_incomplete_list() {
        let p = sample_problem();
        assert_eq!(
            repair_activity_list(&p, &[5, 3, 4]),
            Err(RcpspError::InfeasibleActivityList)
        );
        assert_eq!(
            repair_activity_list(&p, &[0, 1, 2, 3, 4, 5]),
            Err(RcpspError::InfeasibleActivityList)
        );
    }

    #[test]
    fn test_eligible_set_releases_successors() {
        let p = sample_problem();
        let mut set = EligibleSet::new(&p.project);
        assert_eq!(set.eligible(), &[1, 2, 6]);
        let first = set.select(0);
        assert_eq!(first, 1);
        assert_eq!(set.eligible(), &[2, 6, 3]);
    }

    #[test]
    fn test_random_list_feasible() {
        let p = sample_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let list = generate_random_feasible_list(&p, &mut rng).unwrap();
            assert!(is_precedence_feasible(&p, &list));
        }
    }

    #[test]
    fn test_random_list_empty_project() {
        let project = ProjectModel::new(0, vec![], 0).connect_dummies();
        let p = RcpspProblem::new(project).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(generate_random_feasible_list(&p, &mut rng)
            .unwrap()
            .is_empty());
    }

    proptest! {
        #[test]
        fn prop_random_lists_are_feasible(seed in any::<u64>()) {
            let p = sample_problem();
            let mut rng = SmallRng::seed_from_u64(seed);
            let list = generate_random_feasible_list(&p, &mut rng).unwrap();
            prop_assert!(is_precedence_feasible(&p, &list));
        }

        #[test]
        fn prop_repair_is_idempotent(perm in Just(vec![1usize, 2, 3, 4, 5, 6]).prop_shuffle()) {
            let p = sample_problem();
            let once = repair_activity_list(&p, &perm).unwrap();
            prop_assert!(is_precedence_feasible(&p, &once));
            let twice = repair_activity_list(&p, &once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
