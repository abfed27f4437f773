//! Chat completion backends
//!
//! Moderation agents and the comment classifier are prompts sent to a chat
//! model. [`ChatBackend`] hides which model answers them.
//!
//! | Backend | Network | Use |
//! |---------|---------|-----|
//! | [`OpenAiCompatibleBackend`] | yes | any `/chat/completions` endpoint |
//! | [`DemoChatBackend`] | no | local runs without an API key, tests |

mod demo;
mod openai;

pub use demo::DemoChatBackend;
pub use openai::{OpenAiCompatibleBackend, extract_completion};

use async_trait::async_trait;
use serde::Serialize;
use threadsense_application::DispatchError;

/// One message of a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// A chat model that turns a conversation into one reply
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short name reported by `/health` (e.g. "openai", "demo").
    fn name(&self) -> &str;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, DispatchError>;
}
