//! Moderation agent backed by a chat model

use super::prompts;
use crate::chat::{ChatBackend, ChatMessage};
use async_trait::async_trait;
use std::sync::Arc;
use threadsense_application::{AgentRequest, DispatchError, ModerationAgentPort};
use threadsense_domain::{AgentDecision, excerpt, parse_agent_verdict};
use tracing::debug;

/// Comments shown to an agent, after the use case's own cap
const AGENT_COMMENT_LIMIT: usize = 100;

/// Characters of each comment shown to an agent
const AGENT_COMMENT_CHARS: usize = 400;

/// Adapter from [`ModerationAgentPort`] to a [`ChatBackend`]
///
/// The reply is parsed with [`parse_agent_verdict`]; the unprocessed text is
/// kept as `raw_response`. A reply with no recognizable decision is an
/// [`DispatchError::InvalidResponse`].
pub struct LlmModerationAgent {
    backend: Arc<dyn ChatBackend>,
    max_tokens: u32,
}

impl LlmModerationAgent {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            max_tokens: 300,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl ModerationAgentPort for LlmModerationAgent {
    async fn moderate(&self, request: &AgentRequest) -> Result<AgentDecision, DispatchError> {
        let shown = &request.comments[..request.comments.len().min(AGENT_COMMENT_LIMIT)];
        let messages = [
            ChatMessage::system(prompts::agent_system(&request.profile)),
            ChatMessage::user(prompts::agent_user(
                &request.thread_url,
                &request.detected_subreddit,
                shown,
                AGENT_COMMENT_CHARS,
            )),
        ];

        let raw = self.backend.complete(&messages, self.max_tokens).await?;
        debug!("Agent {} replied: {}", request.profile.agent_id, raw);

        let verdict = parse_agent_verdict(&raw).ok_or_else(|| {
            DispatchError::InvalidResponse(format!("no decision in reply: {}", excerpt(&raw, 120)))
        })?;

        Ok(AgentDecision::new(
            &request.profile.subreddit,
            &request.profile.agent_id,
            verdict.decision,
            verdict.confidence,
            verdict.reason,
        )
        .with_raw_response(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::DemoChatBackend;
    use std::sync::Mutex;
    use threadsense_domain::{AgentProfile, ModerationLabel};

    /// Backend replying with a fixed text and recording prompts
    struct FixedBackend {
        reply: Result<String, DispatchError>,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedBackend {
        fn new(reply: Result<&str, DispatchError>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            messages: &[ChatMessage],
            _max_tokens: u32,
        ) -> Result<String, DispatchError> {
            self.prompts
                .lock()
                .unwrap()
                .extend(messages.iter().map(|m| m.content.clone()));
            self.reply.clone()
        }
    }

    fn request(profile: AgentProfile, comments: Vec<&str>) -> AgentRequest {
        AgentRequest {
            thread_url: "https://www.reddit.com/r/science/comments/abc/t/".to_string(),
            detected_subreddit: "science".to_string(),
            profile,
            comments: Arc::new(comments.into_iter().map(str::to_string).collect()),
        }
    }

    #[tokio::test]
    async fn test_json_reply() {
        let backend = Arc::new(FixedBackend::new(Ok(
            r#"{"decision": "PLATFORM_VIOLATION", "confidence": 0.88, "reason": "threat"}"#,
        )));
        let agent = LlmModerationAgent::new(backend.clone());

        let decision = agent
            .moderate(&request(AgentProfile::platform("reddit", "agent-p"), vec!["x"]))
            .await
            .unwrap();

        assert_eq!(decision.subreddit, "reddit");
        assert_eq!(decision.agent_id, "agent-p");
        assert_eq!(decision.decision, "PLATFORM_VIOLATION");
        assert_eq!(decision.label(), ModerationLabel::Violation);
        assert_eq!(decision.confidence, 0.88);
        assert!(decision.raw_response.contains("threat"));

        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[1].contains("[1] x"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_invalid_response() {
        let agent = LlmModerationAgent::new(Arc::new(FixedBackend::new(Ok("I cannot help."))));
        let err = agent
            .moderate(&request(AgentProfile::specialist("science", "s", &[]), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let agent = LlmModerationAgent::new(Arc::new(FixedBackend::new(Err(
            DispatchError::Upstream {
                status: 502,
                body: "bad gateway".into(),
            },
        ))));
        let err = agent
            .moderate(&request(AgentProfile::specialist("science", "s", &[]), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Upstream { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_with_demo_backend() {
        let agent = LlmModerationAgent::new(Arc::new(DemoChatBackend::new()));
        let decision = agent
            .moderate(&request(
                AgentProfile::specialist("science", "agent-science", &["science"]),
                vec!["good point", "shut up, moron"],
            ))
            .await
            .unwrap();
        assert_eq!(decision.label(), ModerationLabel::NeedsWarning);
    }
}
