//! GA configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RcpspError, Result};

/// How parents are paired each generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParentSelection {
    /// Shuffle the population and pair consecutive members; with an odd
    /// size the last member pairs with the first.
    #[default]
    ShuffledPairs,
    /// Draw each parent by k-tournament on makespan.
    Tournament,
}

/// Configuration for [`GeneticAlgorithm`](super::GeneticAlgorithm).
///
/// Missing fields take their defaults when deserialized.
///
/// # Examples
///
/// ```
/// use u_rcpsp::ga::{GaConfig, ParentSelection};
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_generations(100)
///     .with_time_limit_ms(2_000)
///     .with_parent_selection(ParentSelection::Tournament);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals kept after each generation.
    pub population_size: usize,

    /// Number of generations to evolve.
    pub generations: usize,

    /// Per-position probability of an adjacent swap.
    pub mutation_rate: f64,

    /// Wall-clock budget in milliseconds (0 = unlimited).
    ///
    /// Checked between generations, so one generation may overrun it.
    pub time_limit_ms: u64,

    /// Draws per tournament in [`ParentSelection::Tournament`] mode.
    pub tournament_size: usize,

    /// Parent pairing scheme.
    pub parent_selection: ParentSelection,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            generations: 25,
            mutation_rate: 0.05,
            time_limit_ms: 0,
            tournament_size: 3,
            parent_selection: ParentSelection::ShuffledPairs,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_parent_selection(mut self, selection: ParentSelection) -> Self {
        self.parent_selection = selection;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(RcpspError::InvalidConfiguration(
                "population_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(RcpspError::InvalidConfiguration(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.tournament_size == 0 {
            return Err(RcpspError::InvalidConfiguration(
                "tournament_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
