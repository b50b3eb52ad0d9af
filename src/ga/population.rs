//! Initial population construction.
//!
//! Individuals are sampled with regret-based biased random sampling keyed
//! on latest finish times, RBRS(LFT): urgent activities (small LF) are
//! drawn more often, but every eligible activity keeps a nonzero weight.
//! An externally computed schedule can be injected as a seed.
//!
//! # Reference
//! Kolisch & Drexl (1996), "Adaptive search for solving hard project
//! scheduling problems"

use std::collections::HashMap;

use rand::Rng;
use tracing::warn;

use super::activity_list::{is_precedence_feasible, repair_activity_list, EligibleSet};
use super::{Individual, RcpspProblem};
use crate::error::{RcpspError, Result};
use crate::models::{ActivityId, Time};

/// Samples one precedence-feasible list with RBRS(LFT).
///
/// Among the eligible activities, `w_j = (max LF - LF[j]) + 1` and one
/// activity is drawn by integer roulette wheel. A single eligible activity
/// is taken without drawing from `rng`.
///
/// # Errors
/// [`RcpspError::CycleDetected`] if the eligible set empties early.
pub fn rbrs_lft<R: Rng>(problem: &RcpspProblem, rng: &mut R) -> Result<Vec<ActivityId>> {
    let jobs = problem.num_jobs();
    let analysis = &problem.analysis;
    let mut set = EligibleSet::new(&problem.project);
    let mut list = Vec::with_capacity(jobs);

    while list.len() < jobs {
        let pos = match set.len() {
            0 => {
                return Err(RcpspError::CycleDetected {
                    placed: list.len(),
                    expected: jobs,
                })
            }
            1 => 0,
            _ => {
                let eligible = set.eligible();
                let max_lf = eligible
                    .iter()
                    .map(|&j| analysis.latest_finish(j))
                    .max()
                    .unwrap_or(0);
                let weights: Vec<u64> = eligible
                    .iter()
                    .map(|&j| (max_lf - analysis.latest_finish(j)) as u64 + 1)
                    .collect();
                roulette(&weights, rng)
            }
        };
        list.push(set.select(pos));
    }
    Ok(list)
}

/// Index drawn with probability proportional to its weight.
fn roulette<R: Rng>(weights: &[u64], rng: &mut R) -> usize {
    let total: u64 = weights.iter().sum();
    let mut ticket = rng.random_range(0..total);
    for (i, &w) in weights.iter().enumerate() {
        if ticket < w {
            return i;
        }
        ticket -= w;
    }
    weights.len() - 1
}

/// Turns a start-time map into an activity list.
///
/// Real activities are ordered by `(start, topological index)`; the result
/// is repaired if that order is not precedence-feasible.
///
/// # Errors
/// [`RcpspError::InfeasibleSeed`] if a real activity has no start time or
/// the repair fails.
pub fn list_from_start_times(
    problem: &RcpspProblem,
    starts: &HashMap<ActivityId, Time>,
) -> Result<Vec<ActivityId>> {
    let mut keyed = Vec::with_capacity(problem.num_jobs());
    for j in problem.project.real_activities() {
        let start = starts
            .get(&j)
            .ok_or_else(|| RcpspError::InfeasibleSeed(format!("no start time for activity {j}")))?;
        keyed.push((*start, problem.analysis.topological_index(j), j));
    }
    keyed.sort_unstable();
    let list: Vec<ActivityId> = keyed.into_iter().map(|(_, _, j)| j).collect();

    if is_precedence_feasible(problem, &list) {
        return Ok(list);
    }
    repair_activity_list(problem, &list).map_err(|e| RcpspError::InfeasibleSeed(e.to_string()))
}

/// Builds `size` pending individuals.
///
/// The seed, when given and usable, becomes the first individual; an
/// unusable seed is logged and dropped. The rest are RBRS(LFT) samples.
///
/// # Errors
/// - [`RcpspError::EmptyPopulation`] if `size` is zero
/// - [`RcpspError::CycleDetected`] from sampling
pub fn init_population<R: Rng>(
    problem: &RcpspProblem,
    size: usize,
    rng: &mut R,
    seed: Option<&HashMap<ActivityId, Time>>,
) -> Result<Vec<Individual>> {
    if size == 0 {
        return Err(RcpspError::EmptyPopulation);
    }
    let mut population = Vec::with_capacity(size);

    if let Some(starts) = seed {
        match list_from_start_times(problem, starts) {
            Ok(list) => population.push(Individual::new(list)),
            Err(e) => warn!(error = %e, "discarding heuristic seed"),
        }
    }
    while population.len() < size {
        population.push(Individual::new(rbrs_lft(problem, rng)?));
    }
    Ok(population)
}
