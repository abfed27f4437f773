//! Shared memory port
//!
//! The agents share a memory block on the backend. Its id is passed through
//! to the result unchanged; this core never interprets it.

use super::moderation_agent::DispatchError;
use async_trait::async_trait;
use threadsense_domain::AgentDecision;

#[async_trait]
pub trait SharedMemoryPort: Send + Sync {
    /// Create the shared block, or return the existing one.
    async fn acquire(&self) -> Result<String, DispatchError>;

    /// Store the decisions of one run in the block.
    async fn record(&self, memory_id: &str, decisions: &[AgentDecision])
    -> Result<(), DispatchError>;
}
