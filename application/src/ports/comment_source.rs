//! Comment source port

use super::moderation_agent::DispatchError;
use async_trait::async_trait;
use threadsense_domain::ThreadUrl;

/// Source of comment bodies for a thread (e.g. the public Reddit listing)
#[async_trait]
pub trait CommentSourcePort: Send + Sync {
    async fn fetch_comments(&self, thread_url: &ThreadUrl) -> Result<Vec<String>, DispatchError>;
}
