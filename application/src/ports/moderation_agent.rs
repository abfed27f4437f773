//! Moderation agent port
//!
//! Defines the interface for dispatching one thread to one moderation agent.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use threadsense_domain::{AgentDecision, AgentProfile};

/// Errors that can occur while talking to an external collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

/// Everything an agent needs to judge a thread
#[derive(Debug, Clone)]
pub struct AgentRequest {
    pub thread_url: String,
    /// Subreddit detected from the thread URL
    pub detected_subreddit: String,
    /// The agent being dispatched
    pub profile: AgentProfile,
    /// Comment bodies, shared between all dispatches of one thread
    pub comments: Arc<Vec<String>>,
}

/// Gateway to the moderation agents
///
/// One call produces exactly one [`AgentDecision`] for `request.profile`.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModerationAgentPort: Send + Sync {
    async fn moderate(&self, request: &AgentRequest) -> Result<AgentDecision, DispatchError>;
}
