//! Priority rules and rule engine for serial list construction.
//!
//! A priority list is built like any serial activity list: at each step
//! the engine ranks the eligible activities and the best one is appended.
//! Decoding that list gives a deterministic heuristic schedule, whose
//! start times can seed the GA population.
//!
//! # Usage
//!
//! ```
//! use u_rcpsp::dispatching::{heuristic_seed, PriorityRule, RuleEngine};
//! use u_rcpsp::ga::RcpspProblem;
//! use u_rcpsp::models::{ProjectModel, Resource};
//!
//! let project = ProjectModel::new(2, vec![Resource::renewable(1)], 10)
//!     .with_activity(1, 3, vec![1])
//!     .with_activity(2, 1, vec![1])
//!     .connect_dummies();
//! let problem = RcpspProblem::new(project).unwrap();
//!
//! let engine = RuleEngine::new().with_rule(PriorityRule::Spt);
//! let starts = heuristic_seed(&problem, &engine).unwrap();
//! assert_eq!(starts[&2], 0);
//! assert_eq!(starts[&1], 1);
//! ```
//!
//! # References
//!
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited: Theory and computation"
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::PriorityContext;
pub use engine::{EvaluationMode, RuleEngine};
pub use rules::PriorityRule;

use std::collections::HashMap;

use crate::error::{RcpspError, Result};
use crate::ga::activity_list::EligibleSet;
use crate::ga::RcpspProblem;
use crate::models::{ActivityId, Time};

/// Score returned by a priority rule.
///
/// Lower scores = higher priority (scheduled first).
pub type RuleScore = f64;

/// Builds a precedence-feasible list by repeatedly taking the eligible
/// activity the engine ranks first.
///
/// # Errors
/// [`RcpspError::CycleDetected`] if the eligible set empties early.
pub fn priority_list(problem: &RcpspProblem, engine: &RuleEngine) -> Result<Vec<ActivityId>> {
    let jobs = problem.num_jobs();
    let mut set = EligibleSet::new(&problem.project);
    let mut context = PriorityContext::new(problem);
    let mut list = Vec::with_capacity(jobs);

    while list.len() < jobs {
        context.set_eligible(set.eligible());
        let pos = engine
            .select_best(set.eligible(), &context)
            .ok_or(RcpspError::CycleDetected {
                placed: list.len(),
                expected: jobs,
            })?;
        list.push(set.select(pos));
    }
    Ok(list)
}

/// Decodes the priority list and returns the start time of every real
/// activity, in the form accepted as a GA seed.
pub fn heuristic_seed(
    problem: &RcpspProblem,
    engine: &RuleEngine,
) -> Result<HashMap<ActivityId, Time>> {
    let list = priority_list(problem, engine)?;
    let schedule = problem.decoder().decode(&list)?;
    Ok(problem
        .project
        .real_activities()
        .map(|j| (j, schedule.start_of(j)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::activity_list::is_precedence_feasible;
    use crate::ga::activity_list::tests::sample_problem;
    use crate::ga::population::list_from_start_times;

    #[test]
    fn test_every_rule_yields_feasible_list() {
        let p = sample_problem();
        for rule in PriorityRule::ALL {
            let engine = RuleEngine::new().with_rule(rule);
            let list = priority_list(&p, &engine).unwrap();
            assert!(is_precedence_feasible(&p, &list), "{rule}");
        }
    }

    #[test]
    fn test_priority_list_deterministic() {
        let p = sample_problem();
        let engine = RuleEngine::new()
            .with_rule(PriorityRule::Rsm)
            .with_tie_breaker(PriorityRule::Mlft);
        assert_eq!(
            priority_list(&p, &engine).unwrap(),
            priority_list(&p, &engine).unwrap()
        );
    }

    #[test]
    fn test_mlft_list() {
        let p = sample_problem();
        let engine = RuleEngine::new().with_rule(PriorityRule::Mlft);
        // LF: 1 → 34, 2 → 37, 3 → 38, 4 → 38, 5 → 40, 6 → 40
        assert_eq!(priority_list(&p, &engine).unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_empty_engine_falls_back_to_id_order() {
        let p = sample_problem();
        let list = priority_list(&p, &RuleEngine::new()).unwrap();
        assert_eq!(list, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_heuristic_seed_round_trip() {
        let p = sample_problem();
        let engine = RuleEngine::new().with_rule(PriorityRule::Rpw);
        let starts = heuristic_seed(&p, &engine).unwrap();
        assert_eq!(starts.len(), 6);
        assert!(!starts.contains_key(&0));

        let list = list_from_start_times(&p, &starts).unwrap();
        assert!(is_precedence_feasible(&p, &list));
    }
}
