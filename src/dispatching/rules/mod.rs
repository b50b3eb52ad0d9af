//! Built-in priority rules.
//!
//! # Categories
//!
//! - **Duration**: SPT, LPT
//! - **Network**: MTS, RPW, GRPW
//! - **Resource**: MRU
//! - **Time window**: MLST, MLFT, MSLK, RSM
//!
//! # Score Convention
//! All rules return lower scores for higher priority activities.
//!
//! # References
//! - Kolisch (1996), "Efficient priority rules for the resource-constrained
//!   project scheduling problem"
//! - Alvarez-Valdés & Tamarit (1989), "Heuristic algorithms for
//!   resource-constrained project scheduling: A review and an empirical
//!   analysis"

use serde::{Deserialize, Serialize};

use super::{PriorityContext, RuleScore};
use crate::models::ActivityId;

/// Closed set of priority rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityRule {
    /// Shortest Processing Time.
    Spt,
    /// Longest Processing Time.
    Lpt,
    /// Most Total Successors.
    Mts,
    /// Ranked Positional Weight: duration plus all transitive successors'.
    Rpw,
    /// Greatest Rank Positional Weight: duration plus immediate successors'.
    Grpw,
    /// Most Resource Usage.
    Mru,
    /// Minimum Latest Start Time.
    Mlst,
    /// Minimum Latest Finish Time.
    Mlft,
    /// Minimum Slack.
    Mslk,
    /// Resource Scheduling Method (Brand et al., 1964).
    Rsm,
}

impl PriorityRule {
    /// Every rule, in declaration order.
    pub const ALL: [PriorityRule; 10] = [
        PriorityRule::Spt,
        PriorityRule::Lpt,
        PriorityRule::Mts,
        PriorityRule::Rpw,
        PriorityRule::Grpw,
        PriorityRule::Mru,
        PriorityRule::Mlst,
        PriorityRule::Mlft,
        PriorityRule::Mslk,
        PriorityRule::Rsm,
    ];

    /// Rule name (e.g., "SPT", "MLFT").
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spt => "SPT",
            Self::Lpt => "LPT",
            Self::Mts => "MTS",
            Self::Rpw => "RPW",
            Self::Grpw => "GRPW",
            Self::Mru => "MRU",
            Self::Mlst => "MLST",
            Self::Mlft => "MLFT",
            Self::Mslk => "MSLK",
            Self::Rsm => "RSM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Spt => "Shortest Processing Time",
            Self::Lpt => "Longest Processing Time",
            Self::Mts => "Most Total Successors",
            Self::Rpw => "Ranked Positional Weight",
            Self::Grpw => "Greatest Rank Positional Weight",
            Self::Mru => "Most Resource Usage",
            Self::Mlst => "Minimum Latest Start Time",
            Self::Mlft => "Minimum Latest Finish Time",
            Self::Mslk => "Minimum Slack",
            Self::Rsm => "Resource Scheduling Method",
        }
    }

    /// Priority of `id` in `context`; lower = scheduled first.
    pub fn score(&self, id: ActivityId, context: &PriorityContext<'_>) -> RuleScore {
        let project = &context.problem.project;
        let analysis = &context.problem.analysis;
        match self {
            Self::Spt => project.duration(id) as f64,
            Self::Lpt => -(project.duration(id) as f64),
            Self::Mts => -(analysis.transitive_successors(id) as f64),
            Self::Rpw => -(context.ranked_positional_weight(id) as f64),
            Self::Grpw => -(context.greatest_rank_positional_weight(id) as f64),
            Self::Mru => -(project.activities[id].total_demand() as f64),
            Self::Mlst => context.latest_start(id) as f64,
            Self::Mlft => analysis.latest_finish(id) as f64,
            Self::Mslk => context.slack(id) as f64,
            Self::Rsm => {
                // Largest delay `id` would force on another eligible activity
                let finish = context.earliest_finish(id);
                context
                    .eligible
                    .iter()
                    .filter(|&&other| other != id)
                    .map(|&other| finish.saturating_sub(context.latest_start(other)))
                    .max()
                    .unwrap_or(0) as f64
            }
        }
    }
}

impl std::fmt::Display for PriorityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::activity_list::tests::sample_problem;

    #[test]
    fn test_duration_rules() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        assert!(PriorityRule::Spt.score(4, &ctx) < PriorityRule::Spt.score(3, &ctx));
        assert!(PriorityRule::Lpt.score(3, &ctx) < PriorityRule::Lpt.score(4, &ctx));
    }

    #[test]
    fn test_network_rules() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        // 2 precedes 4, 5 and the end; 6 only the end
        assert!(PriorityRule::Mts.score(2, &ctx) < PriorityRule::Mts.score(6, &ctx));
        assert!(PriorityRule::Rpw.score(1, &ctx) < PriorityRule::Rpw.score(2, &ctx));
        assert!(PriorityRule::Grpw.score(1, &ctx) < PriorityRule::Grpw.score(2, &ctx));
    }

    #[test]
    fn test_resource_rule() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        // demands 3 vs 1
        assert!(PriorityRule::Mru.score(4, &ctx) < PriorityRule::Mru.score(2, &ctx));
    }

    #[test]
    fn test_time_window_rules() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        // LF: 1 → 34, 2 → 37, 6 → 40
        assert_eq!(PriorityRule::Mlft.score(1, &ctx), 34.0);
        assert!(PriorityRule::Mlst.score(1, &ctx) < PriorityRule::Mlst.score(6, &ctx));
        assert!(PriorityRule::Mslk.score(1, &ctx) < PriorityRule::Mslk.score(6, &ctx));
    }

    #[test]
    fn test_rsm() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p).with_eligible(&[1, 2, 6]);
        // EF: 1 → 3, 2 → 2, 6 → 5; LS: 1 → 31, 2 → 35, 6 → 35
        assert_eq!(PriorityRule::Rsm.score(1, &ctx), 0.0);
        let single = PriorityContext::new(&p).with_eligible(&[6]);
        assert_eq!(PriorityRule::Rsm.score(6, &single), 0.0);
    }

    #[test]
    fn test_rsm_tight_horizon() {
        let p = sample_problem();
        let mut project = p.project.clone();
        project.horizon = 9;
        let tight = crate::ga::RcpspProblem::new(project).unwrap();
        let ctx = PriorityContext::new(&tight).with_eligible(&[1, 6]);
        // LF(1) = 3, LS(1) = 0; EF(6) = 5 → delays 1 by 5
        assert_eq!(PriorityRule::Rsm.score(6, &ctx), 5.0);
    }

    #[test]
    fn test_names() {
        assert_eq!(PriorityRule::ALL.len(), 10);
        assert_eq!(PriorityRule::Mlft.to_string(), "MLFT");
        assert_eq!(PriorityRule::Rsm.description(), "Resource Scheduling Method");
    }
}
