//! OpenAI-compatible chat completions over HTTP

use super::{ChatBackend, ChatMessage};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use threadsense_application::DispatchError;
use threadsense_domain::excerpt;
use tracing::debug;

/// Characters of an error body kept in [`DispatchError::Upstream`]
const ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

/// Backend for any server implementing `POST {base_url}/chat/completions`
///
/// Some compatible servers answer with server-sent events even when
/// `stream` is false; both framings are accepted.
pub struct OpenAiCompatibleBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OpenAiCompatibleBackend {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.2,
            timeout,
        })
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatBackend for OpenAiCompatibleBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, DispatchError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_error(e))?;
        debug!("Completion response ({}): {}", status, excerpt(&body, 500));

        if !status.is_success() {
            return Err(DispatchError::Upstream {
                status: status.as_u16(),
                body: excerpt(&body, ERROR_BODY_CHARS),
            });
        }

        extract_completion(&body)
    }
}

impl OpenAiCompatibleBackend {
    fn map_error(&self, e: reqwest::Error) -> DispatchError {
        if e.is_timeout() {
            DispatchError::Timeout(self.timeout)
        } else {
            DispatchError::Transport(e.to_string())
        }
    }
}

/// Pull the assistant text out of a completion body.
///
/// Accepts a regular JSON completion or an SSE body (`data: {...}` lines,
/// terminated by `data: [DONE]`) whose chunks carry `choices[0].delta`,
/// `choices[0].message` or a top-level `content`.
pub fn extract_completion(body: &str) -> Result<String, DispatchError> {
    let body = body.trim();

    if body.starts_with("data:") {
        let content: String = body
            .lines()
            .filter_map(|line| line.trim().strip_prefix("data:"))
            .map(str::trim)
            .filter(|data| !data.is_empty() && *data != "[DONE]")
            .filter_map(|data| serde_json::from_str::<Value>(data).ok())
            .filter_map(|chunk| chunk_text(&chunk))
            .collect();

        return if content.trim().is_empty() {
            Err(DispatchError::InvalidResponse(
                "stream contained no content".to_string(),
            ))
        } else {
            Ok(content.trim().to_string())
        };
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| DispatchError::InvalidResponse(format!("not JSON: {e}")))?;
    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DispatchError::InvalidResponse("missing choices[0].message.content".into()))
}

fn chunk_text(chunk: &Value) -> Option<String> {
    if let Some(content) = chunk.get("content").and_then(Value::as_str) {
        return Some(content.to_string());
    }
    let choice = chunk.pointer("/choices/0")?;
    let delta = choice.pointer("/delta/content").and_then(Value::as_str);
    let message = choice.pointer("/message/content").and_then(Value::as_str);
    match (delta, message) {
        (None, None) => None,
        (d, m) => Some(format!("{}{}", d.unwrap_or_default(), m.unwrap_or_default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_completion() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{
            "role":"assistant","content":"{\"decision\":\"FINE\"}"}}]}"#;
        assert_eq!(extract_completion(body).unwrap(), r#"{"decision":"FINE"}"#);
    }

    #[test]
    fn test_extract_sse_deltas() {
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"NEEDS_\"}}]}\n\n\
                    data: {\"choices\":[{\"delta\":{\"content\":\"WARNING\"}}]}\n\n\
                    data: [DONE]\n";
        assert_eq!(extract_completion(body).unwrap(), "NEEDS_WARNING");
    }

    #[test]
    fn test_extract_sse_top_level_content_and_garbage() {
        let body = concat!(
            "data: {\"content\": \"hello \"}\n",
            "data: not json\n",
            "data:\n",
            "data: {\"content\": \"world\"}\n",
        );
        assert_eq!(extract_completion(body).unwrap(), "hello world");
    }

    #[test]
    fn test_extract_empty_stream_is_invalid() {
        let err = extract_completion("data: [DONE]").unwrap_err();
        assert!(matches!(err, DispatchError::InvalidResponse(_)));
    }

    #[test]
    fn test_extract_missing_content() {
        assert!(matches!(
            extract_completion(r#"{"choices": []}"#),
            Err(DispatchError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_completion("<html>bad gateway</html>"),
            Err(DispatchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let backend = OpenAiCompatibleBackend::new(
            "https://api.example.com/v1/",
            "key",
            "model",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(backend.endpoint(), "https://api.example.com/v1/chat/completions");
        assert_eq!(backend.name(), "openai");
    }
}
