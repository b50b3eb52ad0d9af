//! Resource-constrained project scheduling (RCPSP) for the U-Engine ecosystem.
//!
//! Finds short schedules for projects whose activities have durations,
//! precedence relations and demands on renewable resources with fixed
//! capacities. The optimizer is an activity-list genetic algorithm with a
//! serial schedule generation scheme as decoder.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProjectModel`, `Activity`, `Resource`, `Schedule`
//! - **`validation`**: Input integrity checks (shapes, sentinels, references, cycles)
//! - **`preprocess`**: Topological order, transitive closure, CPM time windows
//! - **`scheduler`**: SSGS decoder and schedule KPIs
//! - **`dispatching`**: Priority rules and heuristic seed schedules
//! - **`ga`**: Activity lists, genetic operators, population, evolution loop
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use u_rcpsp::dispatching::{heuristic_seed, PriorityRule, RuleEngine};
//! use u_rcpsp::ga::{GaConfig, GeneticAlgorithm, RcpspProblem};
//! use u_rcpsp::models::{ProjectModel, Resource};
//!
//! let project = ProjectModel::new(4, vec![Resource::renewable(2)], 30)
//!     .with_activity(1, 3, vec![1])
//!     .with_activity(2, 2, vec![2])
//!     .with_activity(3, 4, vec![1])
//!     .with_activity(4, 2, vec![1])
//!     .with_precedence(1, 3)
//!     .with_precedence(2, 4)
//!     .connect_dummies();
//! let problem = RcpspProblem::new(project).unwrap();
//!
//! let seed = heuristic_seed(&problem, &RuleEngine::new().with_rule(PriorityRule::Mlft)).unwrap();
//! let ga = GeneticAlgorithm::new(&problem, GaConfig::default()).unwrap();
//! let result = ga.run(&mut SmallRng::seed_from_u64(42), Some(&seed)).unwrap();
//!
//! let schedule = result.best.schedule().unwrap();
//! assert!(schedule.is_feasible(&problem.project));
//! assert!(result.makespan() >= problem.analysis.critical_path_length());
//! ```
//!
//! # References
//!
//! - Kolisch & Hartmann (1999), "Heuristic algorithms for solving the
//!   resource-constrained project scheduling problem"
//! - Hartmann (1998), "A competitive genetic algorithm for
//!   resource-constrained project scheduling"
//! - Brucker et al. (1999), "Resource-constrained project scheduling:
//!   Notation, classification, models, and methods"

pub mod dispatching;
pub mod error;
pub mod ga;
pub mod models;
pub mod preprocess;
pub mod scheduler;
pub mod validation;

pub use error::{RcpspError, Result};
