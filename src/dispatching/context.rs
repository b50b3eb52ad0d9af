//! Evaluation context for priority rules.

use crate::ga::RcpspProblem;
use crate::models::{ActivityId, Time};

/// Project data and the current decision set passed to priority rules.
///
/// Positional weights are computed once in [`new`](Self::new); the
/// eligible set is replaced at each step of a serial list construction.
#[derive(Debug, Clone)]
pub struct PriorityContext<'a> {
    /// The instance being scheduled.
    pub problem: &'a RcpspProblem,
    /// Activities currently competing for the next list position.
    pub eligible: Vec<ActivityId>,
    ranked_positional_weight: Vec<Time>,
    greatest_rank_positional_weight: Vec<Time>,
}

impl<'a> PriorityContext<'a> {
    /// Builds a context with an empty eligible set.
    pub fn new(problem: &'a RcpspProblem) -> Self {
        let project = &problem.project;
        let n = project.num_activities();

        let mut ranked = (0..n).map(|j| project.duration(j)).collect::<Vec<_>>();
        for i in 0..n {
            let d = project.duration(i);
            for ancestor in problem.analysis.predecessor_closure(i).ones() {
                ranked[ancestor] += d;
            }
        }
        let greatest = (0..n)
            .map(|j| {
                project.duration(j)
                    + project
                        .successors(j)
                        .iter()
                        .map(|&s| project.duration(s))
                        .sum::<Time>()
            })
            .collect();

        Self {
            problem,
            eligible: Vec::new(),
            ranked_positional_weight: ranked,
            greatest_rank_positional_weight: greatest,
        }
    }

    /// Sets the eligible set.
    pub fn with_eligible(mut self, eligible: &[ActivityId]) -> Self {
        self.set_eligible(eligible);
        self
    }

    /// Replaces the eligible set in place.
    pub fn set_eligible(&mut self, eligible: &[ActivityId]) {
        self.eligible.clear();
        self.eligible.extend_from_slice(eligible);
    }

    /// Precedence-only earliest finish.
    #[inline]
    pub fn earliest_finish(&self, id: ActivityId) -> Time {
        self.problem.analysis.earliest_start(id) + self.problem.project.duration(id)
    }

    /// Precedence-only latest start (saturating).
    #[inline]
    pub fn latest_start(&self, id: ActivityId) -> Time {
        self.problem
            .analysis
            .latest_finish(id)
            .saturating_sub(self.problem.project.duration(id))
    }

    /// `LS - ES`, negative when the horizon is too tight.
    #[inline]
    pub fn slack(&self, id: ActivityId) -> i64 {
        self.latest_start(id) as i64 - self.problem.analysis.earliest_start(id) as i64
    }

    /// Own duration plus the durations of all transitive successors.
    #[inline]
    pub fn ranked_positional_weight(&self, id: ActivityId) -> Time {
        self.ranked_positional_weight[id]
    }

    /// Own duration plus the durations of immediate successors.
    #[inline]
    pub fn greatest_rank_positional_weight(&self, id: ActivityId) -> Time {
        self.greatest_rank_positional_weight[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::activity_list::tests::sample_problem;

    #[test]
    fn test_positional_weights() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        // 2 → {4, 5}: 2 + 1 + 2
        assert_eq!(ctx.ranked_positional_weight(2), 5);
        assert_eq!(ctx.greatest_rank_positional_weight(2), 5);
        // 1 → 3 → 5: 3 + 4 + 2, immediate only 3 + 4
        assert_eq!(ctx.ranked_positional_weight(1), 9);
        assert_eq!(ctx.greatest_rank_positional_weight(1), 7);
        assert_eq!(ctx.ranked_positional_weight(6), 5);
    }

    #[test]
    fn test_time_windows() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p).with_eligible(&[1, 2, 6]);
        assert_eq!(ctx.eligible, vec![1, 2, 6]);
        // LF(1) = 34, d = 3
        assert_eq!(ctx.latest_start(1), 31);
        assert_eq!(ctx.slack(1), 31);
        assert_eq!(ctx.earliest_finish(3), 7);
    }
}
