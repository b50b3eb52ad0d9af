//! Project scheduling domain models.
//!
//! Provides the core data types for representing a single-mode
//! resource-constrained project scheduling problem (RCPSP) and its
//! solutions.
//!
//! | u-rcpsp | PSPLIB | Construction | Software |
//! |---------|--------|--------------|----------|
//! | Activity | Job | Work package | Ticket |
//! | Resource | Renewable resource | Crew | Team |
//! | ProjectModel | Instance | Project plan | Release |
//! | Schedule | Solution | Baseline | Roadmap |

mod activity;
mod project;
mod resource;
mod schedule;

pub use activity::{Activity, ActivityId, Time};
pub use project::ProjectModel;
pub use resource::Resource;
pub use schedule::{Schedule, Violation, ViolationType};
