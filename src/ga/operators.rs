//! Genetic operators on activity lists.
//!
//! All operators keep lists precedence-feasible: two-point crossover of
//! feasible parents yields feasible children, and mutation only swaps
//! adjacent activities that are unrelated in the precedence closure.
//! [`GeneticOperators`] bundles the configured rates and the parent
//! pairing scheme.
//!
//! # Usage
//!
//! ```
//! use u_rcpsp::ga::{GaConfig, ParentSelection};
//! use u_rcpsp::ga::operators::GeneticOperators;
//!
//! let ops = GeneticOperators::from(&GaConfig::default());
//! assert_eq!(ops.parent_selection, ParentSelection::ShuffledPairs);
//! assert_eq!(ops.tournament_size, 3);
//! ```
//!
//! # Reference
//! Hartmann (1998), "A competitive genetic algorithm for resource-constrained
//! project scheduling", Sec. 3

use fixedbitset::FixedBitSet;
use rand::Rng;
use rand::seq::SliceRandom;

use super::activity_list::can_swap_adjacent;
use super::config::{GaConfig, ParentSelection};
use super::{Individual, RcpspProblem};
use crate::error::{RcpspError, Result};
use crate::models::{ActivityId, Time};
use crate::scheduler::Decoder;

// ======================== Crossover ========================

/// Two-point crossover with uniformly drawn cut points `0 <= q1 < q2 <= J`.
///
/// Lists shorter than one gene are copied unchanged.
pub fn two_point_crossover<R: Rng>(
    primary: &Individual,
    secondary: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let n = primary.activity_list().len();
    if n == 0 {
        return (Individual::new(Vec::new()), Individual::new(Vec::new()));
    }
    let q1 = rng.random_range(0..n);
    let q2 = rng.random_range(q1 + 1..=n);
    two_point_crossover_at(primary, secondary, q1, q2)
}

/// Two-point crossover at fixed cut points.
///
/// Child A takes `primary[..q1]`, then the first genes of `secondary` not
/// yet used until it holds `q2` genes, then the rest of `primary` in order.
/// Child B swaps the roles. Cut points are clamped to the list length.
pub fn two_point_crossover_at(
    primary: &Individual,
    secondary: &Individual,
    q1: usize,
    q2: usize,
) -> (Individual, Individual) {
    let a = primary.activity_list();
    let b = secondary.activity_list();
    let q2 = q2.min(a.len());
    let q1 = q1.min(q2);
    (
        Individual::new(two_point_child(a, b, q1, q2)),
        Individual::new(two_point_child(b, a, q1, q2)),
    )
}

fn two_point_child(
    primary: &[ActivityId],
    secondary: &[ActivityId],
    q1: usize,
    q2: usize,
) -> Vec<ActivityId> {
    let n = primary.len();
    let bound = primary.iter().copied().max().unwrap_or(0) + 1;
    let mut used = FixedBitSet::with_capacity(bound);
    let mut child = Vec::with_capacity(n);

    for &g in &primary[..q1] {
        used.insert(g);
        child.push(g);
    }
    for &g in secondary {
        if child.len() == q2 {
            break;
        }
        if g < bound && !used.contains(g) {
            used.insert(g);
            child.push(g);
        }
    }
    for &g in primary {
        if !used.contains(g) {
            used.insert(g);
            child.push(g);
        }
    }
    child
}

// ======================== Mutation ========================

/// Swaps each adjacent pair `(i, i + 1)` with probability `rate` when
/// neither activity transitively precedes the other.
///
/// Positions are visited left to right on the list as it is being
/// mutated. Any swap drops the cached schedule.
pub fn mutate_in_place<R: Rng>(
    problem: &RcpspProblem,
    individual: &mut Individual,
    rate: f64,
    rng: &mut R,
) {
    let len = individual.activity_list().len();
    for i in 0..len.saturating_sub(1) {
        let hit = rng.random::<f64>() < rate;
        if hit && can_swap_adjacent(problem, individual.activity_list(), i) {
            individual.swap_adjacent(i);
        }
    }
}

// ======================== Selection ========================

/// Index of the k-tournament winner.
///
/// Draws `k` members uniformly with replacement, decoding pending ones.
/// The smallest makespan wins; ties go to the earliest draw.
///
/// # Errors
/// - [`RcpspError::EmptyPopulation`] if `population` is empty
/// - any decode error of a drawn member
pub fn tournament_select<R: Rng>(
    population: &mut [Individual],
    k: usize,
    decoder: &mut Decoder<'_>,
    rng: &mut R,
) -> Result<usize> {
    if population.is_empty() {
        return Err(RcpspError::EmptyPopulation);
    }
    let mut best: Option<(usize, Time)> = None;
    for _ in 0..k.max(1) {
        let idx = rng.random_range(0..population.len());
        let makespan = population[idx].decode(decoder)?;
        match best {
            Some((_, m)) if m <= makespan => {}
            _ => best = Some((idx, makespan)),
        }
    }
    best.map(|(idx, _)| idx).ok_or(RcpspError::EmptyPopulation)
}

/// Keeps the `target_size` members with the smallest makespan.
///
/// Pending members are decoded first. The sort is stable, so among equal
/// makespans earlier members of `pool` survive.
pub fn rank_select(
    mut pool: Vec<Individual>,
    target_size: usize,
    decoder: &mut Decoder<'_>,
) -> Result<Vec<Individual>> {
    for individual in &mut pool {
        individual.decode(decoder)?;
    }
    pool.sort_by_key(|i| i.makespan().unwrap_or(Time::MAX));
    pool.truncate(target_size);
    Ok(pool)
}

/// Mean pairwise Hamming distance between activity lists.
///
/// Returns 0.0 for fewer than two individuals.
pub fn diversity(population: &[Individual]) -> f64 {
    let n = population.len();
    if n < 2 {
        return 0.0;
    }
    let mut total = 0usize;
    for (i, a) in population.iter().enumerate() {
        for b in &population[i + 1..] {
            total += a
                .activity_list()
                .iter()
                .zip(b.activity_list())
                .filter(|(x, y)| x != y)
                .count();
        }
    }
    total as f64 / (n * (n - 1) / 2) as f64
}

// ======================== Configured bundle ========================

/// Operator settings for one GA run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticOperators {
    /// Per-position adjacent-swap probability.
    pub mutation_rate: f64,
    /// Draws per tournament.
    pub tournament_size: usize,
    /// Parent pairing scheme.
    pub parent_selection: ParentSelection,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self::from(&GaConfig::default())
    }
}

impl From<&GaConfig> for GeneticOperators {
    fn from(config: &GaConfig) -> Self {
        Self {
            mutation_rate: config.mutation_rate,
            tournament_size: config.tournament_size,
            parent_selection: config.parent_selection,
        }
    }
}

impl GeneticOperators {
    /// Performs two-point crossover.
    pub fn crossover<R: Rng>(
        &self,
        primary: &Individual,
        secondary: &Individual,
        rng: &mut R,
    ) -> (Individual, Individual) {
        two_point_crossover(primary, secondary, rng)
    }

    /// Applies adjacent-swap mutation at the configured rate.
    pub fn mutate<R: Rng>(&self, problem: &RcpspProblem, individual: &mut Individual, rng: &mut R) {
        mutate_in_place(problem, individual, self.mutation_rate, rng);
    }

    /// Picks `ceil(len / 2)` parent index pairs.
    ///
    /// In [`ParentSelection::ShuffledPairs`] mode the population is shuffled
    /// in place first.
    pub fn select_parents<R: Rng>(
        &self,
        population: &mut [Individual],
        decoder: &mut Decoder<'_>,
        rng: &mut R,
    ) -> Result<Vec<(usize, usize)>> {
        let n = population.len();
        if n == 0 {
            return Err(RcpspError::EmptyPopulation);
        }
        let pairs = n.div_ceil(2);
        match self.parent_selection {
            ParentSelection::ShuffledPairs => {
                population.shuffle(rng);
                Ok((0..pairs).map(|p| (2 * p, (2 * p + 1) % n)).collect())
            }
            ParentSelection::Tournament => (0..pairs)
                .map(|_| {
                    let a = tournament_select(population, self.tournament_size, decoder, rng)?;
                    let b = tournament_select(population, self.tournament_size, decoder, rng)?;
                    Ok((a, b))
                })
                .collect(),
        }
    }
}
