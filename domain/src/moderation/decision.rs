//! Raw judgments produced by external collaborators.
//!
//! - [`AgentDecision`]: one moderation agent's verdict on a whole thread
//! - [`CommentClassification`]: one comment's label from the classifier job
//!
//! Both are immutable once built. Collaborator failures are represented as
//! data (`ERROR` decisions / labels) rather than dropped.

use super::label::ModerationLabel;
use serde::{Deserialize, Serialize};

/// One agent's judgment on a thread
///
/// `decision` keeps the agent's own spelling; use [`AgentDecision::label`]
/// to get the canonical form. `raw_response` is retained for auditing and
/// is never interpreted by the aggregator.
///
/// # Example
///
/// ```
/// use threadsense_domain::{AgentDecision, ModerationLabel};
///
/// let d = AgentDecision::new("science", "agent-sci", "CLEAN", 0.8, "On topic");
/// assert_eq!(d.label(), ModerationLabel::Fine);
///
/// let failed = AgentDecision::failed("science", "agent-sci", "timed out after 30s");
/// assert_eq!(failed.label(), ModerationLabel::Error);
/// assert_eq!(failed.confidence, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDecision {
    /// Community the agent is specialized for (or the platform scope name)
    pub subreddit: String,
    /// Stable identifier of the agent instance
    pub agent_id: String,
    /// Decision as emitted by the agent (vocabulary varies per agent)
    pub decision: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Free-text justification
    pub reason: String,
    /// Unprocessed agent output
    pub raw_response: String,
}

impl AgentDecision {
    /// Create a decision. Confidence is clamped into [0, 1]; NaN becomes 0.
    pub fn new(
        subreddit: impl Into<String>,
        agent_id: impl Into<String>,
        decision: impl Into<String>,
        confidence: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            subreddit: subreddit.into(),
            agent_id: agent_id.into(),
            decision: decision.into(),
            confidence: clamp_confidence(confidence),
            reason: reason.into(),
            raw_response: String::new(),
        }
    }

    /// Synthetic decision standing in for a failed or timed-out dispatch.
    pub fn failed(
        subreddit: impl Into<String>,
        agent_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(
            subreddit,
            agent_id,
            ModerationLabel::Error.as_str(),
            0.0,
            reason,
        )
    }

    /// Attach the unprocessed agent output.
    pub fn with_raw_response(mut self, raw: impl Into<String>) -> Self {
        self.raw_response = raw.into();
        self
    }

    /// Canonical label for this decision.
    pub fn label(&self) -> ModerationLabel {
        ModerationLabel::normalize(&self.decision)
    }

    /// Whether the decision carries a usable judgment.
    pub fn is_valid(&self) -> bool {
        self.label().is_valid()
    }
}

/// Label assigned to a single comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentClassification {
    /// Comment body, possibly truncated to an excerpt
    pub text: String,
    pub label: ModerationLabel,
    pub reason: Option<String>,
}

impl CommentClassification {
    pub fn new(text: impl Into<String>, label: ModerationLabel) -> Self {
        Self {
            text: text.into(),
            label,
            reason: None,
        }
    }

    /// Classification standing in for a comment the classifier could not label.
    pub fn failed(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(text, ModerationLabel::Error).with_reason(reason)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(AgentDecision::new("s", "a", "FINE", 1.7, "").confidence, 1.0);
        assert_eq!(AgentDecision::new("s", "a", "FINE", -0.2, "").confidence, 0.0);
        assert_eq!(AgentDecision::new("s", "a", "FINE", f64::NAN, "").confidence, 0.0);
        assert_eq!(AgentDecision::new("s", "a", "FINE", 0.42, "").confidence, 0.42);
    }

    #[test]
    fn test_failed_decision_is_error() {
        let d = AgentDecision::failed("worldnews", "agent-wn", "transport error: refused");
        assert_eq!(d.decision, "ERROR");
        assert_eq!(d.confidence, 0.0);
        assert!(!d.is_valid());
        assert!(d.raw_response.is_empty());
        assert_eq!(d.reason, "transport error: refused");
    }

    #[test]
    fn test_label_uses_normalizer() {
        let d = AgentDecision::new("reddit", "platform", "GLOBAL_WARNING", 0.5, "");
        assert_eq!(d.label(), ModerationLabel::NeedsWarning);
        assert!(d.is_valid());

        let unknown = AgentDecision::new("reddit", "platform", "MAYBE", 0.9, "");
        assert_eq!(unknown.label(), ModerationLabel::Error);
    }

    #[test]
    fn test_raw_response_preserved_verbatim() {
        let d = AgentDecision::new("s", "a", "FINE", 0.5, "ok").with_raw_response("{not json");
        assert_eq!(d.raw_response, "{not json");
    }

    #[test]
    fn test_failed_classification() {
        let c = CommentClassification::failed("some comment", "classifier timed out");
        assert_eq!(c.label, ModerationLabel::Error);
        assert_eq!(c.reason.as_deref(), Some("classifier timed out"));
    }

    #[test]
    fn test_classification_serializes_null_reason() {
        let c = CommentClassification::new("hello", ModerationLabel::Fine);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["label"], "FINE");
        assert!(json["reason"].is_null());
    }
}
