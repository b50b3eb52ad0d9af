//! Input validation for project models.
//!
//! Checks structural integrity of a [`ProjectModel`] before preprocessing.
//! Detects:
//! - Shape mismatches (activity count, demand vector lengths)
//! - Sentinel violations (dummy activities with work or wrong links)
//! - Out-of-range references and self loops
//! - Edges listed more than once
//! - Asymmetric predecessor/successor lists
//! - Demands above capacity
//! - Circular precedence dependencies (DAG validation)
//! - Activities not reachable from the start or not reaching the end
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{ActivityId, ProjectModel};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Activity count or demand vector length is inconsistent.
    ShapeMismatch,
    /// A dummy activity carries work or has forbidden links.
    SentinelViolation,
    /// An adjacency list references a missing activity or the activity itself.
    InvalidReference,
    /// An adjacency list names the same activity more than once.
    DuplicateEdge,
    /// An edge appears in only one of the predecessor/successor lists.
    AsymmetricPrecedence,
    /// An activity demands more units than a resource offers.
    DemandExceedsCapacity,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// A real activity is cut off from the dummy start or end.
    Unreachable,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a project model.
///
/// Checks:
/// 1. At least the two sentinels exist; every demand vector has `K` entries
/// 2. Sentinels have zero duration and demand, `0` has no predecessors,
///    `J + 1` has no successors
/// 3. All adjacency entries are in range, not self loops and not repeated
/// 4. Predecessor and successor lists mirror each other
/// 5. No demand exceeds its resource's capacity
/// 6. No circular precedence dependencies
/// 7. Every real activity is reachable from `0` and reaches `J + 1`
///
/// Graph checks (6, 7) only run when the adjacency structure is sound.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_project(project: &ProjectModel) -> ValidationResult {
    let mut errors = Vec::new();
    let n = project.num_activities();
    let k = project.num_resources();

    if n < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ShapeMismatch,
            format!("project needs the two dummy activities, found {n} activities"),
        ));
        return Err(errors);
    }

    for (id, act) in project.activities.iter().enumerate() {
        if act.demand.len() != k {
            errors.push(ValidationError::new(
                ValidationErrorKind::ShapeMismatch,
                format!(
                    "activity {id} has {} demand entries, expected {k}",
                    act.demand.len()
                ),
            ));
        }
    }

    let end = project.end_id();
    for sentinel in [0, end] {
        if !project.activities[sentinel].is_trivial() {
            errors.push(ValidationError::new(
                ValidationErrorKind::SentinelViolation,
                format!("dummy activity {sentinel} must have zero duration and demand"),
            ));
        }
    }
    if !project.predecessors(0).is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SentinelViolation,
            "dummy start must not have predecessors",
        ));
    }
    if !project.successors(end).is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SentinelViolation,
            "dummy end must not have successors",
        ));
    }

    let mut adjacency_sound = true;
    let mut listed = vec![false; n];
    for id in 0..n {
        for (label, list) in [
            ("predecessor", project.predecessors(id)),
            ("successor", project.successors(id)),
        ] {
            for &other in list {
                if other >= n || other == id {
                    adjacency_sound = false;
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidReference,
                        format!("activity {id} lists invalid {label} {other}"),
                    ));
                } else if listed[other] {
                    adjacency_sound = false;
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateEdge,
                        format!("activity {id} lists {label} {other} more than once"),
                    ));
                } else {
                    listed[other] = true;
                }
            }
            for &other in list.iter().filter(|&&other| other < n) {
                listed[other] = false;
            }
        }
    }

    if adjacency_sound {
        for id in 0..n {
            for &s in project.successors(id) {
                if !project.predecessors(s).contains(&id) {
                    adjacency_sound = false;
                    errors.push(ValidationError::new(
                        ValidationErrorKind::AsymmetricPrecedence,
                        format!("edge {id} -> {s} missing from predecessors of {s}"),
                    ));
                }
            }
            for &p in project.predecessors(id) {
                if !project.successors(p).contains(&id) {
                    adjacency_sound = false;
                    errors.push(ValidationError::new(
                        ValidationErrorKind::AsymmetricPrecedence,
                        format!("edge {p} -> {id} missing from successors of {p}"),
                    ));
                }
            }
        }
    }

    for (id, act) in project.activities.iter().enumerate() {
        for (r, (&demand, res)) in act.demand.iter().zip(&project.resources).enumerate() {
            if demand > res.capacity {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DemandExceedsCapacity,
                    format!(
                        "activity {id} demands {demand} units of resource {r} with capacity {}",
                        res.capacity
                    ),
                ));
            }
        }
    }

    if adjacency_sound {
        if let Some(cycle_err) = detect_cycles(project) {
            errors.push(cycle_err);
        } else {
            errors.extend(check_reachability(project));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the precedence graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists. The DFS uses an
/// explicit stack so deep chains cannot overflow the call stack.
fn detect_cycles(project: &ProjectModel) -> Option<ValidationError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InStack,
        Done,
    }

    let n = project.num_activities();
    let mut mark = vec![Mark::Unvisited; n];

    for root in 0..n {
        if mark[root] != Mark::Unvisited {
            continue;
        }
        let mut stack: Vec<(ActivityId, usize)> = vec![(root, 0)];
        mark[root] = Mark::InStack;
        while let Some(top) = stack.last_mut() {
            let node = top.0;
            let succs = project.successors(node);
            if top.1 < succs.len() {
                let s = succs[top.1];
                top.1 += 1;
                match mark[s] {
                    Mark::InStack => {
                        return Some(ValidationError::new(
                            ValidationErrorKind::CyclicDependency,
                            format!("Circular dependency detected involving activity {s}"),
                        ));
                    }
                    Mark::Unvisited => {
                        mark[s] = Mark::InStack;
                        stack.push((s, 0));
                    }
                    Mark::Done => {}
                }
            } else {
                mark[node] = Mark::Done;
                stack.pop();
            }
        }
    }

    None
}

fn check_reachability(project: &ProjectModel) -> Vec<ValidationError> {
    let forward = reach(project, 0, |id| project.successors(id));
    let backward = reach(project, project.end_id(), |id| project.predecessors(id));

    let mut errors = Vec::new();
    for id in project.real_activities() {
        if !forward[id] {
            errors.push(ValidationError::new(
                ValidationErrorKind::Unreachable,
                format!("activity {id} is not reachable from the dummy start"),
            ));
        }
        if !backward[id] {
            errors.push(ValidationError::new(
                ValidationErrorKind::Unreachable,
                format!("activity {id} does not reach the dummy end"),
            ));
        }
    }
    errors
}

fn reach<'a, F>(project: &ProjectModel, from: ActivityId, next: F) -> Vec<bool>
where
    F: Fn(ActivityId) -> &'a [ActivityId],
{
    let mut seen = vec![false; project.num_activities()];
    let mut stack = vec![from];
    seen[from] = true;
    while let Some(id) = stack.pop() {
        for &other in next(id) {
            if !seen[other] {
                seen[other] = true;
                stack.push(other);
            }
        }
    }
    seen
}
