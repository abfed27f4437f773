//! Offline chat backend with deterministic replies
//!
//! Answers moderation and classification prompts with keyword heuristics so
//! the service runs end to end without an API key.

use super::{ChatBackend, ChatMessage};
use crate::moderation::prompts::{CLASSIFIER_ROLE, PLATFORM_ROLE, parse_numbered};
use async_trait::async_trait;
use serde_json::json;
use threadsense_application::DispatchError;
use threadsense_domain::ModerationLabel;

const VIOLATION_TERMS: &[&str] = &[
    "kill yourself",
    "kys",
    "doxx",
    "home address",
    "i will find you",
];
const WARNING_TERMS: &[&str] = &["idiot", "stupid", "moron", "shut up", "trash", "clown"];

/// Keyword heuristic used for every demo judgment.
pub fn demo_label(text: &str) -> ModerationLabel {
    let lower = text.to_lowercase();
    if VIOLATION_TERMS.iter().any(|t| lower.contains(t)) {
        ModerationLabel::Violation
    } else if WARNING_TERMS.iter().any(|t| lower.contains(t)) {
        ModerationLabel::NeedsWarning
    } else {
        ModerationLabel::Fine
    }
}

#[derive(Debug, Default)]
pub struct DemoChatBackend;

impl DemoChatBackend {
    pub fn new() -> Self {
        Self
    }

    fn classify(comments: &[String]) -> String {
        let labels: Vec<_> = comments
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let label = demo_label(text);
                json!({
                    "index": i + 1,
                    "label": label.as_str(),
                    "reason": format!("demo heuristic: {}", label.as_str().to_lowercase()),
                })
            })
            .collect();
        serde_json::Value::Array(labels).to_string()
    }

    fn judge(comments: &[String], platform: bool) -> String {
        let flagged: Vec<ModerationLabel> = comments
            .iter()
            .map(|c| demo_label(c))
            .filter(|l| *l != ModerationLabel::Fine)
            .collect();
        let worst = flagged
            .iter()
            .copied()
            .max_by_key(|l| l.severity())
            .unwrap_or(ModerationLabel::Fine);

        let (decision, confidence) = match (worst, platform) {
            (ModerationLabel::Violation, true) => ("PLATFORM_VIOLATION", 0.9),
            (ModerationLabel::Violation, false) => ("VIOLATION", 0.85),
            (ModerationLabel::NeedsWarning, true) => ("GLOBAL_WARNING", 0.7),
            (ModerationLabel::NeedsWarning, false) => ("NEEDS_WARNING", 0.75),
            (_, true) => ("CLEAN", 0.8),
            (_, false) => ("FINE", 0.72),
        };

        json!({
            "decision": decision,
            "confidence": confidence,
            "reason": format!(
                "{} of {} comments flagged by demo heuristics",
                flagged.len(),
                comments.len()
            ),
        })
        .to_string()
    }
}

#[async_trait]
impl ChatBackend for DemoChatBackend {
    fn name(&self) -> &str {
        "demo"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        _max_tokens: u32,
    ) -> Result<String, DispatchError> {
        let system = messages
            .iter()
            .find(|m| m.role == "system")
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let user = messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .ok_or_else(|| DispatchError::Other("no user message".to_string()))?;
        let comments = parse_numbered(&user.content);

        if system.contains(CLASSIFIER_ROLE) {
            Ok(Self::classify(&comments))
        } else {
            Ok(Self::judge(&comments, system.contains(PLATFORM_ROLE)))
        }
    }
}
