//! LLM-backed moderation adapters
//!
//! Implement the agent and classifier ports on top of a
//! [`ChatBackend`](crate::chat::ChatBackend).

mod agent;
mod classifier;
pub mod prompts;

pub use agent::LlmModerationAgent;
pub use classifier::LlmCommentClassifier;
