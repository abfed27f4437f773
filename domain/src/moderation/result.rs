//! Moderation result assembly
//!
//! [`ModerationResultBuilder`] is the only way to obtain a
//! [`ModerationResult`]. It performs no decision logic of its own beyond
//! running the [`VerdictAggregator`]; a missing pass-through field is a
//! construction error, never a silent default.

use super::decision::{AgentDecision, CommentClassification};
use super::verdict::{FinalDecision, VerdictAggregator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling a [`ModerationResult`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Top-level moderation outcome for one thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub thread_url: String,
    pub detected_subreddit: String,
    pub agent_used: String,
    pub comment_count: usize,
    /// In dispatch order
    pub agent_decisions: Vec<AgentDecision>,
    pub final_decision: FinalDecision,
    /// Opaque handle to the classifier's shared memory, passed through unchanged
    pub shared_memory_id: String,
    pub comment_classifications: Vec<CommentClassification>,
}

/// Builder for [`ModerationResult`]
///
/// # Example
///
/// ```
/// use threadsense_domain::{AgentDecision, ModerationLabel, ModerationResultBuilder};
///
/// let result = ModerationResultBuilder::new()
///     .thread_url("https://www.reddit.com/r/science/comments/abc/title/")
///     .detected_subreddit("science")
///     .agent_used("science")
///     .comment_count(0)
///     .shared_memory_id("block-1")
///     .agent_decisions(vec![AgentDecision::new("science", "sci", "FINE", 0.8, "ok")])
///     .build()
///     .unwrap();
///
/// assert_eq!(result.final_decision.final_decision, ModerationLabel::Fine);
/// ```
#[derive(Debug, Default)]
pub struct ModerationResultBuilder {
    thread_url: Option<String>,
    detected_subreddit: Option<String>,
    agent_used: Option<String>,
    comment_count: Option<usize>,
    shared_memory_id: Option<String>,
    agent_decisions: Vec<AgentDecision>,
    comment_classifications: Vec<CommentClassification>,
}

impl ModerationResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_url(mut self, url: impl Into<String>) -> Self {
        self.thread_url = Some(url.into());
        self
    }

    pub fn detected_subreddit(mut self, subreddit: impl Into<String>) -> Self {
        self.detected_subreddit = Some(subreddit.into());
        self
    }

    pub fn agent_used(mut self, agent: impl Into<String>) -> Self {
        self.agent_used = Some(agent.into());
        self
    }

    pub fn comment_count(mut self, count: usize) -> Self {
        self.comment_count = Some(count);
        self
    }

    pub fn shared_memory_id(mut self, id: impl Into<String>) -> Self {
        self.shared_memory_id = Some(id.into());
        self
    }

    pub fn agent_decisions(mut self, decisions: Vec<AgentDecision>) -> Self {
        self.agent_decisions = decisions;
        self
    }

    pub fn comment_classifications(mut self, classifications: Vec<CommentClassification>) -> Self {
        self.comment_classifications = classifications;
        self
    }

    /// Validate pass-through fields, aggregate, and produce the result.
    pub fn build(self) -> Result<ModerationResult, AssemblyError> {
        let thread_url = required(self.thread_url, "thread_url")?;
        let detected_subreddit = required(self.detected_subreddit, "detected_subreddit")?;
        let agent_used = required(self.agent_used, "agent_used")?;
        let shared_memory_id = required(self.shared_memory_id, "shared_memory_id")?;
        let comment_count = self
            .comment_count
            .ok_or(AssemblyError::MissingField("comment_count"))?;

        let final_decision =
            VerdictAggregator::aggregate(&self.agent_decisions, &self.comment_classifications);

        Ok(ModerationResult {
            thread_url,
            detected_subreddit,
            agent_used,
            comment_count,
            agent_decisions: self.agent_decisions,
            final_decision,
            shared_memory_id,
            comment_classifications: self.comment_classifications,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, AssemblyError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AssemblyError::MissingField(field)),
    }
}
