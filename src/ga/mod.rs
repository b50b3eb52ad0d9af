//! Activity-list genetic algorithm for the RCPSP.
//!
//! # Encoding
//!
//! An individual is a precedence-feasible permutation of the real
//! activities `1..=J`. The serial schedule generation scheme
//! ([`Decoder`](crate::scheduler::Decoder)) maps it to a schedule; the
//! makespan of that schedule is the fitness (lower = better).
//!
//! # Submodules
//!
//! - [`activity_list`]: feasibility checks, repair, random sampling
//! - [`operators`]: two-point crossover, adjacent-swap mutation, selection
//! - [`population`]: RBRS(LFT) sampling and heuristic seeding
//!
//! # Reference
//! - Hartmann (1998), "A competitive genetic algorithm for
//!   resource-constrained project scheduling"
//! - Kolisch & Hartmann (2006), "Experimental investigation of heuristics
//!   for resource-constrained project scheduling: An update"

pub mod activity_list;
mod config;
mod evolution;
mod individual;
pub mod operators;
pub mod population;
mod problem;

pub use activity_list::{
    can_swap_adjacent, generate_random_feasible_list, is_precedence_feasible,
    repair_activity_list, EligibleSet,
};
pub use config::{GaConfig, ParentSelection};
pub use evolution::{GaResult, GenerationStats, GeneticAlgorithm, TerminationReason};
pub use individual::Individual;
pub use operators::GeneticOperators;
pub use population::{init_population, list_from_start_times, rbrs_lft};
pub use problem::RcpspProblem;
