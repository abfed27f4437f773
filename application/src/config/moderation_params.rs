//! Moderation parameters: dispatch control for the moderate-thread use case.
//!
//! [`ModerationParams`] groups the static limits applied while collecting
//! agent decisions and comment labels for one thread. These are
//! application-layer concerns, not domain policy.

use std::time::Duration;

/// Dispatch control parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationParams {
    /// Independent timeout applied to each agent dispatch.
    pub agent_timeout: Duration,
    /// Timeout for the whole comment-classification job.
    pub classifier_timeout: Duration,
    /// Comments beyond this many are not classified.
    pub max_comments: usize,
    /// Comment text kept in each classification, in characters.
    pub excerpt_chars: usize,
}

impl Default for ModerationParams {
    fn default() -> Self {
        Self {
            agent_timeout: Duration::from_secs(30),
            classifier_timeout: Duration::from_secs(60),
            max_comments: 200,
            excerpt_chars: 280,
        }
    }
}

impl ModerationParams {
    // ==================== Builder Methods ====================

    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = timeout;
        self
    }

    pub fn with_max_comments(mut self, max: usize) -> Self {
        self.max_comments = max;
        self
    }

    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }
}
