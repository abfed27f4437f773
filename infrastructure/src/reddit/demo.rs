//! Canned comments for runs without network access

use async_trait::async_trait;
use threadsense_application::{CommentSourcePort, DispatchError};
use threadsense_domain::ThreadUrl;

const DEMO_COMMENTS: &[&str] = &[
    "This is a really interesting take. I've been following this for months now.",
    "I disagree completely. The data doesn't support this conclusion at all.",
    "As someone who works in this field, I can confirm this is mostly accurate.",
    "Why is everyone so negative? This could be a game-changer.",
    "Only an idiot would believe the benchmarks in this post.",
    "I'm skeptical about the scalability claims. Has anyone tested this at scale?",
    "Great write-up! Thanks for sharing your insights.",
    "Has anyone considered the security implications here?",
    "Shut up and read the paper before commenting, seriously.",
    "The documentation is thin, but the idea is solid.",
    "I'm concerned about long-term maintenance. Who supports this in 5 years?",
    "This is exactly what I needed for my project. Thanks for the explanation!",
];

/// Comment source returning the same comments for every thread
#[derive(Debug, Default)]
pub struct DemoCommentSource;

impl DemoCommentSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommentSourcePort for DemoCommentSource {
    async fn fetch_comments(&self, _thread_url: &ThreadUrl) -> Result<Vec<String>, DispatchError> {
        Ok(DEMO_COMMENTS.iter().map(|c| c.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_comments() {
        let url = ThreadUrl::parse("https://www.reddit.com/r/science/comments/a/").unwrap();
        let comments = DemoCommentSource::new().fetch_comments(&url).await.unwrap();
        assert_eq!(comments.len(), DEMO_COMMENTS.len());
    }
}
