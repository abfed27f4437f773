//! History entries for past moderation runs

use super::label::ModerationLabel;
use super::result::ModerationResult;
use serde::{Deserialize, Serialize};

/// Summary of one completed moderation run, as kept in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique, monotonically increasing per store
    pub id: u64,
    pub thread_url: String,
    pub detected_subreddit: String,
    pub agent_used: String,
    pub final_decision: ModerationLabel,
    pub confidence: f64,
    pub comment_count: usize,
    pub valid_responses: usize,
    pub total_agents: usize,
    /// Milliseconds since the Unix epoch
    pub recorded_at: u64,
}

impl HistoryEntry {
    /// Summarize a result. `id` is assigned by the store on append.
    pub fn from_result(result: &ModerationResult) -> Self {
        Self {
            id: 0,
            thread_url: result.thread_url.clone(),
            detected_subreddit: result.detected_subreddit.clone(),
            agent_used: result.agent_used.clone(),
            final_decision: result.final_decision.final_decision,
            confidence: result.final_decision.confidence,
            comment_count: result.comment_count,
            valid_responses: result.final_decision.valid_responses,
            total_agents: result.final_decision.total_agents,
            recorded_at: current_timestamp(),
        }
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
