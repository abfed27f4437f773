//! Comment classifier port

use super::moderation_agent::DispatchError;
use async_trait::async_trait;
use threadsense_domain::CommentClassification;

/// Batch classifier labelling each comment of a thread
///
/// Implementations should return one classification per input comment, in
/// input order. The use case repairs short or long replies, so a
/// misbehaving backend cannot change the comment count.
#[async_trait]
pub trait CommentClassifierPort: Send + Sync {
    async fn classify(
        &self,
        thread_url: &str,
        comments: &[String],
    ) -> Result<Vec<CommentClassification>, DispatchError>;
}
