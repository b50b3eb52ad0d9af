//! RCPSP problem definition for the activity-list GA.
//!
//! Bundles a validated [`ProjectModel`] with its [`ProjectAnalysis`] so
//! that list operators, the initializer and the decoder share one
//! immutable view of the instance.
//!
//! # Reference
//! Hartmann (1998), "A competitive genetic algorithm for resource-constrained
//! project scheduling"

use crate::error::Result;
use crate::models::{ActivityId, ProjectModel};
use crate::preprocess::ProjectAnalysis;
use crate::scheduler::Decoder;

/// A preprocessed RCPSP instance.
///
/// # Example
/// ```
/// use u_rcpsp::ga::RcpspProblem;
/// use u_rcpsp::models::{ProjectModel, Resource};
///
/// let project = ProjectModel::new(2, vec![Resource::renewable(1)], 10)
///     .with_activity(1, 2, vec![1])
///     .with_activity(2, 3, vec![1])
///     .connect_dummies();
/// let problem = RcpspProblem::new(project).unwrap();
///
/// let mut decoder = problem.decoder();
/// let schedule = decoder.decode(&[1, 2]).unwrap();
/// assert_eq!(schedule.makespan(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct RcpspProblem {
    /// The project instance.
    pub project: ProjectModel,
    /// Derived precedence data.
    pub analysis: ProjectAnalysis,
}

impl RcpspProblem {
    /// Validates and preprocesses a project.
    pub fn new(project: ProjectModel) -> Result<Self> {
        let analysis = ProjectAnalysis::new(&project)?;
        Ok(Self { project, analysis })
    }

    /// Number of real activities (`J`), the activity-list length.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.project.num_jobs()
    }

    /// Creates a decoder with its own workspace.
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.project, &self.analysis)
    }

    /// Real activities in topological order, always a feasible activity list.
    pub fn topological_list(&self) -> Vec<ActivityId> {
        self.analysis
            .topological_order()
            .iter()
            .copied()
            .filter(|&id| self.project.is_real(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RcpspError;
    use crate::models::Resource;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_topological_list() {
        let project = ProjectModel::new(3, vec![Resource::renewable(1)], 10)
            .with_activity(1, 1, vec![1])
            .with_activity(2, 1, vec![1])
            .with_activity(3, 1, vec![1])
            .with_precedence(3, 1)
            .connect_dummies();
        let problem = RcpspProblem::new(project).unwrap();
        let list = problem.topological_list();
        assert_eq!(list.len(), 3);
        let pos = |id| list.iter().position(|&x| x == id).unwrap();
        assert!(pos(3) < pos(1));
    }

    #[test]
    fn test_invalid_project_rejected() {
        let project = ProjectModel::new(1, vec![Resource::renewable(1)], 10)
            .with_activity(1, 1, vec![2])
            .connect_dummies();
        assert!(matches!(
            RcpspProblem::new(project),
            Err(RcpspError::InvalidProject(_))
        ));
    }

    #[test]
    fn test_duplicate_predecessor_is_invalid_not_cyclic() {
        let mut project = ProjectModel::new(2, vec![Resource::renewable(1)], 10)
            .with_activity(1, 1, vec![1])
            .with_activity(2, 1, vec![1])
            .with_precedence(1, 2)
            .connect_dummies();
        project.activities[2].predecessors.push(1);
        match RcpspProblem::new(project) {
            Err(RcpspError::InvalidProject(errors)) => {
                assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::DuplicateEdge));
            }
            other => panic!("expected InvalidProject, got {other:?}"),
        }
    }
}
