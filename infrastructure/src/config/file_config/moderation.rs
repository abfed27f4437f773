//! Moderation configuration from TOML (`[moderation]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use threadsense_application::ModerationParams;
use threadsense_domain::{ConfigIssue, ConfigIssueCode};

/// Raw moderation configuration from TOML
///
/// # Example
///
/// ```toml
/// [moderation]
/// agent_timeout_secs = 30
/// classifier_timeout_secs = 60
/// max_comments = 200
/// excerpt_chars = 280
/// classifier_batch_size = 25
/// default_agent = "askreddit"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModerationConfig {
    /// Timeout for each agent dispatch
    pub agent_timeout_secs: u64,
    /// Timeout for the whole comment classification job
    pub classifier_timeout_secs: u64,
    /// Comments considered per thread
    pub max_comments: usize,
    /// Characters of comment text kept in each classification
    pub excerpt_chars: usize,
    /// Comments sent to the classifier per backend request
    pub classifier_batch_size: usize,
    /// Subreddit agent used when no pattern matches
    pub default_agent: Option<String>,
}

impl Default for FileModerationConfig {
    fn default() -> Self {
        let params = ModerationParams::default();
        Self {
            agent_timeout_secs: params.agent_timeout.as_secs(),
            classifier_timeout_secs: params.classifier_timeout.as_secs(),
            max_comments: params.max_comments,
            excerpt_chars: params.excerpt_chars,
            classifier_batch_size: 25,
            default_agent: None,
        }
    }
}

impl FileModerationConfig {
    /// Convert to application-layer ModerationParams
    pub fn to_params(&self) -> ModerationParams {
        ModerationParams::default()
            .with_agent_timeout(Duration::from_secs(self.agent_timeout_secs))
            .with_classifier_timeout(Duration::from_secs(self.classifier_timeout_secs))
            .with_max_comments(self.max_comments)
            .with_excerpt_chars(self.excerpt_chars)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("moderation.agent_timeout_secs", self.agent_timeout_secs as usize),
            ("moderation.classifier_timeout_secs", self.classifier_timeout_secs as usize),
            ("moderation.excerpt_chars", self.excerpt_chars),
            ("moderation.classifier_batch_size", self.classifier_batch_size),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: field.to_string(),
                },
                format!("{field} must be greater than zero"),
            )
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_params() {
        assert_eq!(
            FileModerationConfig::default().to_params(),
            ModerationParams::default()
        );
    }

    #[test]
    fn test_to_params() {
        let config = FileModerationConfig {
            agent_timeout_secs: 5,
            max_comments: 20,
            ..Default::default()
        };
        let params = config.to_params();
        assert_eq!(params.agent_timeout, Duration::from_secs(5));
        assert_eq!(params.max_comments, 20);
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let config = FileModerationConfig {
            classifier_timeout_secs: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(ConfigIssue::any_errors(&issues));
    }
}
