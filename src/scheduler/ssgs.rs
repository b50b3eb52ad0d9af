//! Serial Schedule Generation Scheme (SSGS).
//!
//! # Algorithm
//!
//! 1. Reset the time-indexed availability grid to full capacity.
//! 2. Take activities in list order. Each starts no earlier than its
//!    precedence-only earliest start and its predecessors' finish times.
//! 3. Shift the start right until every resource has enough free units over
//!    the whole processing window.
//! 4. Book the window in the grid.
//! 5. Place the dummy end; its start is the makespan.
//!
//! When a window fails, the next candidate start is one past the latest
//! conflicting instant in that window. Every start in between still covers
//! that instant, so the chosen start equals that of a unit-step scan.
//!
//! # Complexity
//! O(J · K · H) worst case for horizon H.
//!
//! # Reference
//! Kolisch (1996), "Serial and parallel resource-constrained project
//! scheduling methods revisited: Theory and computation"

use crate::error::{RcpspError, Result};
use crate::models::{ActivityId, ProjectModel, Schedule, Time};
use crate::preprocess::ProjectAnalysis;

/// Scratch state for one decode: availability grid and start/finish arrays.
///
/// Reset at the start of every decode, so a workspace can be reused across
/// any number of activity lists.
#[derive(Debug, Clone)]
pub struct DecoderWorkspace {
    avail: Vec<Vec<u32>>,
    start: Vec<Time>,
    finish: Vec<Time>,
    placed: Vec<bool>,
}

impl DecoderWorkspace {
    /// Allocates a workspace sized for `project`.
    pub fn new(project: &ProjectModel) -> Self {
        let n = project.num_activities();
        Self {
            avail: project
                .resources
                .iter()
                .map(|r| vec![r.capacity; project.horizon])
                .collect(),
            start: vec![0; n],
            finish: vec![0; n],
            placed: vec![false; n],
        }
    }

    fn reset(&mut self, project: &ProjectModel) {
        for (row, res) in self.avail.iter_mut().zip(&project.resources) {
            row.fill(res.capacity);
        }
        self.start.fill(0);
        self.finish.fill(0);
        self.placed.fill(false);
        self.placed[0] = true;
    }
}

/// SSGS decoder bound to one project.
///
/// Owns its [`DecoderWorkspace`]; decoding takes `&mut self`, so a decoder
/// serves one decode at a time. Parallel evaluation uses one decoder per
/// worker.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    project: &'a ProjectModel,
    analysis: &'a ProjectAnalysis,
    workspace: DecoderWorkspace,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder with a fresh workspace.
    pub fn new(project: &'a ProjectModel, analysis: &'a ProjectAnalysis) -> Self {
        Self {
            project,
            analysis,
            workspace: DecoderWorkspace::new(project),
        }
    }

    /// Decodes a precedence-feasible activity list into a schedule.
    ///
    /// # Errors
    /// - [`RcpspError::InfeasibleActivityList`] if `list` is not a
    ///   precedence-feasible permutation of the real activities
    /// - [`RcpspError::NoFeasiblePlacement`] if some activity cannot start
    ///   within the horizon
    pub fn decode(&mut self, list: &[ActivityId]) -> Result<Schedule> {
        let project = self.project;
        if list.len() != project.num_jobs() {
            return Err(RcpspError::InfeasibleActivityList);
        }
        self.workspace.reset(project);

        for &j in list {
            if !project.is_real(j) || self.workspace.placed[j] {
                return Err(RcpspError::InfeasibleActivityList);
            }
            self.place(j)?;
        }
        self.place(project.end_id())?;

        Ok(Schedule {
            start: self.workspace.start.clone(),
            finish: self.workspace.finish.clone(),
        })
    }

    fn place(&mut self, j: ActivityId) -> Result<()> {
        let project = self.project;
        let ws = &mut self.workspace;

        let mut earliest = self.analysis.earliest_start(j);
        for &p in project.predecessors(j) {
            if !ws.placed[p] {
                return Err(RcpspError::InfeasibleActivityList);
            }
            earliest = earliest.max(ws.finish[p]);
        }

        let duration = project.duration(j);
        let demand = &project.activities[j].demand;
        let horizon = project.horizon;

        let mut t = earliest;
        loop {
            if t + duration > horizon {
                return Err(RcpspError::NoFeasiblePlacement {
                    activity: j,
                    earliest,
                    horizon,
                });
            }
            match latest_conflict(&ws.avail, demand, t, t + duration) {
                Some(tau) => t = tau + 1,
                None => break,
            }
        }

        for (row, &d) in ws.avail.iter_mut().zip(demand) {
            if d == 0 {
                continue;
            }
            for slot in &mut row[t..t + duration] {
                *slot -= d;
            }
        }
        ws.start[j] = t;
        ws.finish[j] = t + duration;
        ws.placed[j] = true;
        Ok(())
    }
}

/// Latest instant in `[from, to)` where some resource lacks the demanded units.
fn latest_conflict(avail: &[Vec<u32>], demand: &[u32], from: Time, to: Time) -> Option<Time> {
    avail
        .iter()
        .zip(demand)
        .filter(|&(_, &d)| d > 0)
        .filter_map(|(row, &d)| (from..to).rev().find(|&tau| row[tau] < d))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{generate_random_feasible_list, rbrs_lft, RcpspProblem};
    use crate::models::Resource;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    /// Capacity 2, durations [2, 3, 1], demands [1, 2, 1], 1 → 3.
    fn contention_problem() -> RcpspProblem {
        let project = ProjectModel::new(3, vec![Resource::renewable(2)], 10)
            .with_activity(1, 2, vec![1])
            .with_activity(2, 3, vec![2])
            .with_activity(3, 1, vec![1])
            .with_precedence(1, 3)
            .connect_dummies();
        RcpspProblem::new(project).unwrap()
    }

    #[test]
    fn test_decode_list_order_123() {
        let p = contention_problem();
        let s = p.decoder().decode(&[1, 2, 3]).unwrap();
        assert_eq!(&s.start[1..=3], &[0, 2, 5]);
        assert_eq!(s.makespan(), 6);
    }

    #[test]
    fn test_decode_list_order_213() {
        let p = contention_problem();
        let s = p.decoder().decode(&[2, 1, 3]).unwrap();
        assert_eq!(s.start[1], 3);
        assert_eq!(s.start[2], 0);
        assert_eq!(s.start[3], 5);
        assert_eq!(s.makespan(), 6);
    }

    #[test]
    fn test_decode_is_deterministic_and_reusable() {
        let p = contention_problem();
        let mut decoder = p.decoder();
        let a = decoder.decode(&[1, 2, 3]).unwrap();
        let _ = decoder.decode(&[2, 1, 3]).unwrap();
        let b = decoder.decode(&[1, 2, 3]).unwrap();
        let c = p.decoder().decode(&[1, 2, 3]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_decoded_schedule_is_feasible() {
        let p = contention_problem();
        let mut decoder = p.decoder();
        for list in [[1, 2, 3], [2, 1, 3], [1, 3, 2]] {
            let s = decoder.decode(&list).unwrap();
            assert!(s.is_feasible(&p.project), "{list:?}");
        }
    }

    #[test]
    fn test_horizon_too_short() {
        let p = contention_problem();
        let mut project = p.project.clone();
        project.horizon = 5;
        let analysis = ProjectAnalysis::new(&project).unwrap();
        let err = Decoder::new(&project, &analysis)
            .decode(&[1, 2, 3])
            .unwrap_err();
        assert_eq!(
            err,
            RcpspError::NoFeasiblePlacement {
                activity: 3,
                earliest: 2,
                horizon: 5
            }
        );
    }

    #[test]
    fn test_infeasible_list_rejected() {
        let p = contention_problem();
        let mut decoder = p.decoder();
        assert_eq!(
            decoder.decode(&[3, 1, 2]),
            Err(RcpspError::InfeasibleActivityList)
        );
        assert_eq!(
            decoder.decode(&[1, 1, 3]),
            Err(RcpspError::InfeasibleActivityList)
        );
        assert_eq!(decoder.decode(&[1, 2]), Err(RcpspError::InfeasibleActivityList));
    }

    #[test]
    fn test_zero_duration_activity() {
        let project = ProjectModel::new(2, vec![Resource::renewable(1)], 4)
            .with_activity(1, 4, vec![1])
            .with_activity(2, 0, vec![1])
            .connect_dummies();
        let p = RcpspProblem::new(project).unwrap();
        let s = p.decoder().decode(&[1, 2]).unwrap();
        assert_eq!(s.start[2], 0);
        assert_eq!(s.makespan(), 4);
    }

    /// Reference unit-step scan used to check the jump optimisation.
    fn naive_start(
        avail: &[Vec<u32>],
        demand: &[u32],
        earliest: Time,
        dur: Time,
        h: Time,
    ) -> Option<Time> {
        (earliest..=h.saturating_sub(dur)).find(|&t| {
            avail
                .iter()
                .zip(demand)
                .all(|(row, &d)| (t..t + dur).all(|tau| row[tau] >= d))
        })
    }

    #[test]
    fn test_jump_matches_unit_scan() {
        let avail = vec![
            vec![2, 0, 2, 1, 2, 2, 0, 2, 2, 2],
            vec![1, 1, 0, 1, 1, 1, 1, 1, 0, 1],
        ];
        for dur in 0..4 {
            for earliest in 0..6 {
                let demand = [2, 1];
                let mut t = earliest;
                let jumped = loop {
                    if t + dur > 10 {
                        break None;
                    }
                    match latest_conflict(&avail, &demand, t, t + dur) {
                        Some(tau) => t = tau + 1,
                        None => break Some(t),
                    }
                };
                assert_eq!(jumped, naive_start(&avail, &demand, earliest, dur, 10));
            }
        }
    }

    /// Random DAG over `jobs` activities with `k` resources. Durations and
    /// demands may be zero; the horizon is the sum of durations.
    fn random_problem(rng: &mut SmallRng, jobs: usize, k: usize) -> RcpspProblem {
        let resources: Vec<Resource> = (0..k)
            .map(|_| Resource::renewable(rng.random_range(1..=4)))
            .collect();
        let capacities: Vec<u32> = resources.iter().map(|r| r.capacity).collect();
        let mut project = ProjectModel::new(jobs, resources, 0);
        for j in 1..=jobs {
            let demand = capacities
                .iter()
                .map(|&c| rng.random_range(0..=c))
                .collect();
            project = project.with_activity(j, rng.random_range(0..=4), demand);
        }
        for i in 1..=jobs {
            for j in i + 1..=jobs {
                if rng.random_bool(0.3) {
                    project = project.with_precedence(i, j);
                }
            }
        }
        let horizon = project.sum_of_durations();
        RcpspProblem::new(project.connect_dummies().with_horizon(horizon)).unwrap()
    }

    proptest! {
        #[test]
        fn prop_decode_respects_precedence_and_capacity(
            seed in any::<u64>(),
            jobs in 1usize..12,
            k in 2usize..4,
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let p = random_problem(&mut rng, jobs, k);
            let mut decoder = p.decoder();
            for _ in 0..4 {
                for list in [
                    generate_random_feasible_list(&p, &mut rng).unwrap(),
                    rbrs_lft(&p, &mut rng).unwrap(),
                ] {
                    let s = decoder.decode(&list).unwrap();
                    prop_assert!(s.violations(&p.project).is_empty(), "{:?}", list);
                    prop_assert!(s.makespan() <= p.project.horizon);
                    prop_assert!(s.makespan() >= p.analysis.critical_path_length());
                }
            }
        }
    }
}
