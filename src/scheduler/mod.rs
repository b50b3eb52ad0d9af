//! Schedule generation and KPI evaluation.
//!
//! # Algorithm
//!
//! [`Decoder`] implements the serial schedule generation scheme: activities
//! are taken in list order and each starts at the earliest instant that is
//! both precedence- and resource-feasible.
//!
//! # KPI
//!
//! [`ScheduleKpi`] computes makespan, the gap to the critical-path bound,
//! resource utilization and average slack.
//!
//! # References
//!
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited: Theory and computation"
//! - Kolisch & Hartmann (1999), "Heuristic algorithms for solving the
//!   resource-constrained project scheduling problem"

mod kpi;
mod ssgs;

pub use kpi::ScheduleKpi;
pub use ssgs::{Decoder, DecoderWorkspace};
