//! Generational evolution loop.
//!
//! # Algorithm
//!
//! 1. Build the initial population (optional seed + RBRS(LFT)) and decode it.
//! 2. Each generation: pair parents, cross each pair over, mutate both
//!    children, keep at most `population_size` children, decode them.
//! 3. Merge parents and children and keep the best `population_size`
//!    by makespan (elitist ranking).
//! 4. Stop after `generations` generations or once the wall-clock budget
//!    is spent. The budget is checked between generations only.
//!
//! # Reference
//! Hartmann (1998), "A competitive genetic algorithm for resource-constrained
//! project scheduling"

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, trace};

use super::activity_list::{is_precedence_feasible, repair_activity_list};
use super::operators::{diversity, rank_select, GeneticOperators};
use super::population::init_population;
use super::{GaConfig, Individual, RcpspProblem};
use crate::error::{RcpspError, Result};
use crate::models::{ActivityId, Time};
use crate::scheduler::Decoder;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The configured number of generations was evolved.
    GenerationLimit,
    /// The wall-clock budget ran out.
    TimeLimit,
}

/// Population summary after one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Smallest makespan in the population.
    pub best: Time,
    /// Smallest makespan found so far in the run.
    pub best_so_far: Time,
    /// Mean makespan of the population.
    pub mean: f64,
    /// Mean pairwise Hamming distance of the activity lists.
    pub diversity: f64,
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best individual found, decoded.
    pub best: Individual,
    /// Generations evolved.
    pub generations: usize,
    /// Why the run stopped.
    pub termination: TerminationReason,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// One entry per evolved generation.
    pub history: Vec<GenerationStats>,
}

impl GaResult {
    /// Makespan of the best individual.
    pub fn makespan(&self) -> Time {
        makespan_of(&self.best)
    }
}

/// Activity-list GA for the RCPSP.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_rcpsp::ga::{GaConfig, GeneticAlgorithm, RcpspProblem};
/// use u_rcpsp::models::{ProjectModel, Resource};
///
/// let project = ProjectModel::new(3, vec![Resource::renewable(2)], 20)
///     .with_activity(1, 2, vec![1])
///     .with_activity(2, 3, vec![2])
///     .with_activity(3, 1, vec![1])
///     .with_precedence(1, 3)
///     .connect_dummies();
/// let problem = RcpspProblem::new(project).unwrap();
/// let ga = GeneticAlgorithm::new(&problem, GaConfig::default()).unwrap();
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let result = ga.run(&mut rng, None).unwrap();
/// assert_eq!(result.makespan(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm<'p> {
    problem: &'p RcpspProblem,
    config: GaConfig,
    operators: GeneticOperators,
}

impl<'p> GeneticAlgorithm<'p> {
    /// Validates `config` and binds it to `problem`.
    ///
    /// # Errors
    /// [`RcpspError::InvalidConfiguration`] on out-of-range parameters.
    pub fn new(problem: &'p RcpspProblem, config: GaConfig) -> Result<Self> {
        config.validate()?;
        let operators = GeneticOperators::from(&config);
        Ok(Self {
            problem,
            config,
            operators,
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA to termination.
    ///
    /// `seed` is an optional start-time map injected as the first
    /// individual; an unusable seed is dropped with a warning.
    ///
    /// # Errors
    /// Any decode error, e.g. [`RcpspError::NoFeasiblePlacement`] when the
    /// horizon is too short.
    #[tracing::instrument(
        level = "debug",
        name = "RCPSP GA",
        skip_all,
        fields(jobs = self.problem.num_jobs(), population = self.config.population_size)
    )]
    pub fn run<R: Rng>(
        &self,
        rng: &mut R,
        seed: Option<&HashMap<ActivityId, Time>>,
    ) -> Result<GaResult> {
        let started = Instant::now();
        let time_limit = (self.config.time_limit_ms > 0)
            .then(|| Duration::from_millis(self.config.time_limit_ms));
        info!(
            generations = self.config.generations,
            time_limit_ms = self.config.time_limit_ms,
            seeded = seed.is_some(),
            "starting GA"
        );

        let mut decoder = self.problem.decoder();
        let mut population = init_population(self.problem, self.config.population_size, rng, seed)?;
        for individual in &mut population {
            individual.decode(&mut decoder)?;
        }
        let mut best = population
            .iter()
            .min_by_key(|i| makespan_of(i))
            .cloned()
            .ok_or(RcpspError::EmptyPopulation)?;

        let mut history = Vec::new();
        let mut generation = 0;
        let termination = loop {
            if generation >= self.config.generations {
                break TerminationReason::GenerationLimit;
            }
            self.evolve(&mut population, &mut decoder, rng)?;
            generation += 1;

            if let Some(leader) = population.first() {
                if makespan_of(leader) < makespan_of(&best) {
                    trace!(
                        generation,
                        from = makespan_of(&best),
                        to = makespan_of(leader),
                        "new global best"
                    );
                    best = leader.clone();
                }
            }

            let stats = generation_stats(generation, &population, makespan_of(&best));
            debug!(
                generation,
                best = stats.best,
                best_so_far = stats.best_so_far,
                mean = stats.mean,
                diversity = stats.diversity,
                "generation finished"
            );
            history.push(stats);

            if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                break TerminationReason::TimeLimit;
            }
        };

        let elapsed = started.elapsed();
        info!(
            makespan = makespan_of(&best),
            generations = generation,
            ?termination,
            ?elapsed,
            "GA finished"
        );
        Ok(GaResult {
            best,
            generations: generation,
            termination,
            elapsed,
            history,
        })
    }

    /// One generation: breed, merge and keep the best `population_size`.
    fn evolve<R: Rng>(
        &self,
        population: &mut Vec<Individual>,
        decoder: &mut Decoder<'_>,
        rng: &mut R,
    ) -> Result<()> {
        let size = self.config.population_size;
        let pairs = self.operators.select_parents(population, decoder, rng)?;

        let mut children = Vec::with_capacity(2 * pairs.len());
        for (a, b) in pairs {
            let (mut first, mut second) =
                self.operators.crossover(&population[a], &population[b], rng);
            self.operators.mutate(self.problem, &mut first, rng);
            self.operators.mutate(self.problem, &mut second, rng);
            children.push(first);
            children.push(second);
        }
        children.truncate(size);

        for child in &mut children {
            if !is_precedence_feasible(self.problem, child.activity_list()) {
                let repaired = repair_activity_list(self.problem, child.activity_list())?;
                child.set_activity_list(repaired);
            }
            child.decode(decoder)?;
        }

        let mut pool = std::mem::take(population);
        pool.extend(children);
        *population = rank_select(pool, size, decoder)?;
        Ok(())
    }
}

fn makespan_of(individual: &Individual) -> Time {
    individual.makespan().unwrap_or(Time::MAX)
}

fn generation_stats(
    generation: usize,
    population: &[Individual],
    best_so_far: Time,
) -> GenerationStats {
    let makespans: Vec<Time> = population.iter().map(makespan_of).collect();
    let best = makespans.iter().copied().min().unwrap_or(0);
    let mean = if makespans.is_empty() {
        0.0
    } else {
        makespans.iter().map(|&m| m as f64).sum::<f64>() / makespans.len() as f64
    };
    GenerationStats {
        generation,
        best,
        best_so_far,
        mean,
        diversity: diversity(population),
    }
}
