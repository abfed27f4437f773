//! Verdict aggregation
//!
//! Reduces a thread's agent decisions to one [`FinalDecision`].
//!
//! Two signals are produced side by side and must not be conflated:
//!
//! - `final_decision` / `confidence` come from the **agents** (thread-level)
//! - `verdict_breakdown` counts **comment classifications** (comment-level)
//!
//! # Algorithm
//!
//! 1. Normalize every agent decision.
//! 2. Split into valid (`!= ERROR`) and invalid.
//! 3. No valid decisions → `ERROR` with confidence `0.0`.
//! 4. Otherwise the most severe valid label wins (escalation bias).
//! 5. Confidence is the mean over the valid decisions carrying the winning label.

use super::decision::{AgentDecision, CommentClassification};
use super::label::ModerationLabel;
use serde::{Deserialize, Serialize};

/// Per-label tally of comment classifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictBreakdown {
    #[serde(rename = "VIOLATION")]
    pub violation: usize,
    #[serde(rename = "NEEDS_WARNING")]
    pub needs_warning: usize,
    #[serde(rename = "FINE")]
    pub fine: usize,
    #[serde(rename = "ERROR")]
    pub error: usize,
}

impl VerdictBreakdown {
    /// Count classifications per canonical label.
    pub fn from_classifications(classifications: &[CommentClassification]) -> Self {
        classifications.iter().fold(Self::default(), |mut acc, c| {
            *acc.slot(c.label) += 1;
            acc
        })
    }

    /// Count for one label.
    pub fn count(&self, label: ModerationLabel) -> usize {
        match label {
            ModerationLabel::Violation => self.violation,
            ModerationLabel::NeedsWarning => self.needs_warning,
            ModerationLabel::Fine => self.fine,
            ModerationLabel::Error => self.error,
        }
    }

    /// Sum of all buckets; equals the number of classifications counted.
    pub fn total(&self) -> usize {
        self.violation + self.needs_warning + self.fine + self.error
    }

    fn slot(&mut self, label: ModerationLabel) -> &mut usize {
        match label {
            ModerationLabel::Violation => &mut self.violation,
            ModerationLabel::NeedsWarning => &mut self.needs_warning,
            ModerationLabel::Fine => &mut self.fine,
            ModerationLabel::Error => &mut self.error,
        }
    }
}

/// Canonical thread-level moderation outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalDecision {
    pub final_decision: ModerationLabel,
    /// Mean confidence of the agents that voted for `final_decision`
    pub confidence: f64,
    pub verdict_breakdown: VerdictBreakdown,
    pub total_agents: usize,
    pub valid_responses: usize,
}

impl FinalDecision {
    /// No agent produced a usable judgment.
    pub fn is_inconclusive(&self) -> bool {
        self.final_decision == ModerationLabel::Error
    }
}

/// Pure aggregation of agent decisions and comment classifications
///
/// # Example
///
/// ```
/// use threadsense_domain::{AgentDecision, ModerationLabel, VerdictAggregator};
///
/// let decisions = vec![
///     AgentDecision::new("science", "sci", "VIOLATION", 0.9, "off-topic spam"),
///     AgentDecision::new("reddit", "platform", "CLEAN", 0.6, "nothing sitewide"),
///     AgentDecision::failed("reddit", "backup", "timeout"),
/// ];
///
/// let result = VerdictAggregator::aggregate(&decisions, &[]);
/// assert_eq!(result.final_decision, ModerationLabel::Violation);
/// assert_eq!(result.confidence, 0.9);
/// assert_eq!(result.total_agents, 3);
/// assert_eq!(result.valid_responses, 2);
/// ```
pub struct VerdictAggregator;

impl VerdictAggregator {
    pub fn aggregate(
        decisions: &[AgentDecision],
        classifications: &[CommentClassification],
    ) -> FinalDecision {
        let verdict_breakdown = VerdictBreakdown::from_classifications(classifications);

        let valid: Vec<(ModerationLabel, f64)> = decisions
            .iter()
            .map(|d| (d.label(), d.confidence))
            .filter(|(label, _)| label.is_valid())
            .collect();

        let total_agents = decisions.len();
        let valid_responses = valid.len();

        let Some(winner) = Self::resolve_label(valid.iter().map(|(label, _)| *label)) else {
            return FinalDecision {
                final_decision: ModerationLabel::Error,
                confidence: 0.0,
                verdict_breakdown,
                total_agents,
                valid_responses,
            };
        };

        let (sum, n) = valid
            .iter()
            .filter(|(label, _)| *label == winner)
            .fold((0.0_f64, 0_usize), |(sum, n), (_, c)| (sum + c, n + 1));
        let confidence = if n == 0 {
            0.0
        } else {
            (sum / n as f64).clamp(0.0, 1.0)
        };

        FinalDecision {
            final_decision: winner,
            confidence,
            verdict_breakdown,
            total_agents,
            valid_responses,
        }
    }

    /// Most severe valid label, `None` if there are none.
    fn resolve_label(labels: impl Iterator<Item = ModerationLabel>) -> Option<ModerationLabel> {
        labels
            .filter(|l| l.is_valid())
            .max_by_key(|l| l.severity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(decision: &str, confidence: f64) -> AgentDecision {
        AgentDecision::new("test", "agent", decision, confidence, "reason")
    }

    fn comment(label: ModerationLabel) -> CommentClassification {
        CommentClassification::new("text", label)
    }

    // ==================== Label resolution ====================

    #[test]
    fn test_severity_precedence() {
        let decisions = vec![
            agent("FINE", 0.7),
            agent("VIOLATION", 0.8),
            agent("NEEDS_WARNING", 0.6),
        ];
        let result = VerdictAggregator::aggregate(&decisions, &[]);
        assert_eq!(result.final_decision, ModerationLabel::Violation);
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn test_warning_beats_fine() {
        let decisions = vec![agent("CLEAN", 0.9), agent("GLOBAL_WARNING", 0.4)];
        let result = VerdictAggregator::aggregate(&decisions, &[]);
        assert_eq!(result.final_decision, ModerationLabel::NeedsWarning);
        assert_eq!(result.confidence, 0.4);
    }

    #[test]
    fn test_all_fine() {
        let decisions = vec![agent("FINE", 0.5), agent("CLEAN", 0.7)];
        let result = VerdictAggregator::aggregate(&decisions, &[]);
        assert_eq!(result.final_decision, ModerationLabel::Fine);
        assert!((result.confidence - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_scenario_with_error() {
        let decisions = vec![agent("VIOLATION", 0.9), agent("FINE", 0.6), agent("ERROR", 0.0)];
        let result = VerdictAggregator::aggregate(&decisions, &[]);
        assert_eq!(result.final_decision, ModerationLabel::Violation);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.total_agents, 3);
        assert_eq!(result.valid_responses, 2);
    }

    #[test]
    fn test_alias_matches_canonical_aggregation() {
        let aliased = vec![agent("PLATFORM_VIOLATION", 0.8), agent("VIOLATION", 0.6)];
        let canonical = vec![agent("VIOLATION", 0.8), agent("VIOLATION", 0.6)];
        assert_eq!(
            VerdictAggregator::aggregate(&aliased, &[]),
            VerdictAggregator::aggregate(&canonical, &[])
        );
    }

    // ==================== Confidence ====================

    #[test]
    fn test_confidence_ignores_dissenting_votes() {
        let decisions = vec![agent("VIOLATION", 0.8), agent("VIOLATION", 0.6), agent("FINE", 0.05)];
        let result = VerdictAggregator::aggregate(&decisions, &[]);
        assert!((result.confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_high_confidence_error_does_not_count() {
        // An ERROR decision carrying a confidence must not leak into the mean
        let decisions = vec![agent("INCONCLUSIVE", 1.0), agent("FINE", 0.3)];
        let result = VerdictAggregator::aggregate(&decisions, &[]);
        assert_eq!(result.final_decision, ModerationLabel::Fine);
        assert_eq!(result.confidence, 0.3);
        assert_eq!(result.valid_responses, 1);
    }

    // ==================== Total failure ====================

    #[test]
    fn test_no_agents() {
        let result = VerdictAggregator::aggregate(&[], &[]);
        assert_eq!(result.final_decision, ModerationLabel::Error);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.total_agents, 0);
        assert_eq!(result.valid_responses, 0);
        assert!(result.is_inconclusive());
    }

    #[test]
    fn test_all_invalid() {
        let decisions = vec![agent("MAYBE", 0.9), AgentDecision::failed("s", "a", "timeout")];
        let result = VerdictAggregator::aggregate(&decisions, &[]);
        assert_eq!(result.final_decision, ModerationLabel::Error);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.total_agents, 2);
        assert_eq!(result.valid_responses, 0);
    }

    #[test]
    fn test_duplicate_agent_ids_counted_separately() {
        let decisions = vec![agent("FINE", 0.5), agent("FINE", 0.5)];
        let result = VerdictAggregator::aggregate(&decisions, &[]);
        assert_eq!(result.total_agents, 2);
        assert_eq!(result.valid_responses, 2);
    }

    // ==================== Breakdown ====================

    #[test]
    fn test_breakdown_counts_comments() {
        use ModerationLabel::*;
        let comments = vec![
            comment(Fine),
            comment(Fine),
            comment(Violation),
            comment(NeedsWarning),
            comment(Error),
        ];
        let result = VerdictAggregator::aggregate(&[agent("FINE", 0.9)], &comments);
        let b = result.verdict_breakdown;
        assert_eq!((b.violation, b.needs_warning, b.fine, b.error), (1, 1, 2, 1));
        assert_eq!(b.total(), comments.len());
    }

    #[test]
    fn test_breakdown_is_independent_of_agents() {
        // Agents say VIOLATION, every comment is FINE: both signals are kept as-is
        let comments = vec![comment(ModerationLabel::Fine); 3];
        let result = VerdictAggregator::aggregate(&[agent("VIOLATION", 0.9)], &comments);
        assert_eq!(result.final_decision, ModerationLabel::Violation);
        assert_eq!(result.verdict_breakdown.fine, 3);
        assert_eq!(result.verdict_breakdown.violation, 0);
    }

    #[test]
    fn test_breakdown_wire_keys() {
        let b = VerdictBreakdown::from_classifications(&[comment(ModerationLabel::NeedsWarning)]);
        let json = serde_json::to_value(b).unwrap();
        assert_eq!(json["NEEDS_WARNING"], 1);
        assert_eq!(json["VIOLATION"], 0);
        assert_eq!(json["FINE"], 0);
        assert_eq!(json["ERROR"], 0);
    }

    // ==================== Idempotence ====================

    #[test]
    fn test_aggregation_is_idempotent() {
        let decisions = vec![
            agent("NEEDS_WARNING", 0.35),
            agent("GLOBAL_WARNING", 0.71),
            agent("CLEAN", 0.2),
        ];
        let comments = vec![comment(ModerationLabel::Fine), comment(ModerationLabel::Violation)];
        let first = VerdictAggregator::aggregate(&decisions, &comments);
        let second = VerdictAggregator::aggregate(&decisions, &comments);
        let first = serde_json::to_string(&first).unwrap();
        let second = serde_json::to_string(&second).unwrap();
        assert_eq!(first, second);
    }
}
