//! Error taxonomy for preprocessing, decoding and evolution.
//!
//! Preprocessing and decoding errors are always propagated: an instance
//! that cannot be decoded never reports a makespan. Crossover and
//! mutation cannot fail and therefore have no error variants.

use thiserror::Error;

use crate::models::{ActivityId, Time};
use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RcpspError>;

/// Errors raised by the RCPSP core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RcpspError {
    /// The project failed structural validation.
    #[error("invalid project: {}", summarize(.0))]
    InvalidProject(Vec<ValidationError>),

    /// A topological pass could not place every activity.
    #[error("precedence cycle detected: placed {placed} of {expected} activities")]
    CycleDetected { placed: usize, expected: usize },

    /// Activity-list repair did not reach a fixed point within its bound.
    #[error("activity list repair did not converge after {iterations} moves")]
    RepairDiverged { iterations: usize },

    /// The decoder found no start time within the horizon.
    #[error(
        "no feasible placement for activity {activity} at or after t={earliest} \
         within horizon {horizon}"
    )]
    NoFeasiblePlacement {
        activity: ActivityId,
        earliest: Time,
        horizon: Time,
    },

    /// The decoder was handed a list that is not a precedence-feasible
    /// permutation of the real activities.
    #[error("activity list is not a precedence-feasible permutation")]
    InfeasibleActivityList,

    /// A heuristic seed could not be turned into a feasible activity list.
    #[error("infeasible seed: {0}")]
    InfeasibleSeed(String),

    /// A population of size zero was requested.
    #[error("population must contain at least one individual")]
    EmptyPopulation,

    /// The GA configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
