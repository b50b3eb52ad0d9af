//! Rule engine for multi-criteria prioritization.
//!
//! Composes priority rules either sequentially (next rule only on ties) or
//! as a weighted sum. Remaining ties always go to the smaller activity id,
//! so every ordering is deterministic.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{PriorityContext, PriorityRule, RuleScore};
use crate::models::ActivityId;

/// How multiple rules are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvaluationMode {
    /// Apply rules in sequence; use next rule only on ties.
    #[default]
    Sequential,
    /// Compute weighted sum of all rule scores.
    Weighted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct WeightedRule {
    rule: PriorityRule,
    weight: f64,
}

/// A composable rule engine for activity prioritization.
///
/// # Example
/// ```
/// use u_rcpsp::dispatching::{PriorityRule, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(PriorityRule::Mlft)
///     .with_tie_breaker(PriorityRule::Spt);
/// assert_eq!(engine.rules(), vec![PriorityRule::Mlft, PriorityRule::Spt]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEngine {
    rules: Vec<WeightedRule>,
    mode: EvaluationMode,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            epsilon: 1e-9,
        }
    }

    /// Adds a primary rule (weight 1.0).
    pub fn with_rule(mut self, rule: PriorityRule) -> Self {
        self.rules.push(WeightedRule { rule, weight: 1.0 });
        self
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule(mut self, rule: PriorityRule, weight: f64) -> Self {
        self.rules.push(WeightedRule { rule, weight });
        self
    }

    /// Adds a tie-breaking rule (weight 0.0, used only in Sequential mode).
    pub fn with_tie_breaker(mut self, rule: PriorityRule) -> Self {
        self.rules.push(WeightedRule { rule, weight: 0.0 });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Configured rules in evaluation order.
    pub fn rules(&self) -> Vec<PriorityRule> {
        self.rules.iter().map(|wr| wr.rule).collect()
    }

    /// Sorts candidates by priority (highest priority first).
    ///
    /// Returns indices into `candidates`.
    pub fn sort_indices(
        &self,
        candidates: &[ActivityId],
        context: &PriorityContext<'_>,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        match self.mode {
            EvaluationMode::Sequential => {
                indices.sort_by(|&a, &b| {
                    self.compare_sequential(candidates[a], candidates[b], context)
                });
            }
            EvaluationMode::Weighted => {
                let scores: Vec<f64> = candidates
                    .iter()
                    .map(|&id| self.weighted_score(id, context))
                    .collect();
                indices.sort_by(|&a, &b| {
                    scores[a]
                        .partial_cmp(&scores[b])
                        .unwrap_or(Ordering::Equal)
                        .then(candidates[a].cmp(&candidates[b]))
                });
            }
        }
        indices
    }

    /// Index of the highest-priority candidate.
    pub fn select_best(
        &self,
        candidates: &[ActivityId],
        context: &PriorityContext<'_>,
    ) -> Option<usize> {
        self.sort_indices(candidates, context).first().copied()
    }

    /// Evaluates one activity and returns the weighted score of each rule.
    pub fn evaluate(&self, id: ActivityId, context: &PriorityContext<'_>) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|wr| wr.rule.score(id, context) * wr.weight)
            .collect()
    }

    fn compare_sequential(
        &self,
        a: ActivityId,
        b: ActivityId,
        context: &PriorityContext<'_>,
    ) -> Ordering {
        for wr in &self.rules {
            let score_a = wr.rule.score(a, context);
            let score_b = wr.rule.score(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        a.cmp(&b)
    }

    fn weighted_score(&self, id: ActivityId, context: &PriorityContext<'_>) -> f64 {
        self.rules
            .iter()
            .map(|wr| wr.rule.score(id, context) * wr.weight)
            .sum()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::activity_list::tests::sample_problem;

    #[test]
    fn test_spt_ordering() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        let engine = RuleEngine::new().with_rule(PriorityRule::Spt);

        // durations 4, 1, 5
        let candidates = [3, 4, 6];
        let indices = engine.sort_indices(&candidates, &ctx);
        assert_eq!(indices, vec![1, 0, 2]);
    }

    #[test]
    fn test_mlft_ordering() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        let engine = RuleEngine::new().with_rule(PriorityRule::Mlft);

        let candidates = [6, 2, 1];
        let indices = engine.sort_indices(&candidates, &ctx);
        assert_eq!(candidates[indices[0]], 1);
        assert_eq!(candidates[indices[1]], 2);
        assert_eq!(candidates[indices[2]], 6);
    }

    #[test]
    fn test_sequential_with_tie_breaker() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        // LF(3) = LF(4) = 38; SPT picks 4 (duration 1)
        let engine = RuleEngine::new()
            .with_rule(PriorityRule::Mlft)
            .with_tie_breaker(PriorityRule::Spt);
        assert_eq!(engine.select_best(&[3, 4], &ctx), Some(1));
    }

    #[test]
    fn test_final_tie_by_id() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        // LF(5) = LF(6) = 40
        let engine = RuleEngine::new().with_rule(PriorityRule::Mlft);
        assert_eq!(engine.sort_indices(&[6, 5], &ctx), vec![1, 0]);
    }

    #[test]
    fn test_weighted_mode() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        let engine = RuleEngine::new()
            .with_mode(EvaluationMode::Weighted)
            .with_weighted_rule(PriorityRule::Mlft, 0.5)
            .with_weighted_rule(PriorityRule::Spt, 0.5);

        // 1: 0.5*34 + 0.5*3 = 18.5
        // 6: 0.5*40 + 0.5*5 = 22.5
        assert_eq!(engine.select_best(&[6, 1], &ctx), Some(1));
    }

    #[test]
    fn test_empty_candidates() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        let engine = RuleEngine::new().with_rule(PriorityRule::Spt);
        assert!(engine.sort_indices(&[], &ctx).is_empty());
        assert!(engine.select_best(&[], &ctx).is_none());
    }

    #[test]
    fn test_evaluate_scores() {
        let p = sample_problem();
        let ctx = PriorityContext::new(&p);
        let engine = RuleEngine::new()
            .with_rule(PriorityRule::Spt)
            .with_rule(PriorityRule::Mlft);

        let scores = engine.evaluate(3, &ctx);
        assert_eq!(scores.len(), 2);
        assert!((scores[0] - 4.0).abs() < 1e-10);
        assert!((scores[1] - 38.0).abs() < 1e-10);
    }

    #[test]
    fn test_engine_serde() {
        let engine = RuleEngine::new()
            .with_rule(PriorityRule::Rpw)
            .with_tie_breaker(PriorityRule::Spt);
        let json = serde_json::to_string(&engine).unwrap();
        let back: RuleEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, engine);
    }
}
