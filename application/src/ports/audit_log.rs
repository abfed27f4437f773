//! Port for the moderation audit log.
//!
//! Defines the [`AuditLog`] trait for recording moderation events (raw agent
//! replies, final verdicts) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port keeps the unprocessed
//! agent output in a machine-readable format for later review. How an event
//! is laid out on disk belongs to the adapter.

use threadsense_domain::{AgentDecision, ModerationResult};

/// A structured audit event.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditEvent {
    /// One agent answered, failed, or timed out
    AgentDecision {
        thread_url: String,
        decision: AgentDecision,
    },
    /// A result was assembled and returned
    ModerationCompleted { result: ModerationResult },
}

impl AuditEvent {
    /// Event type identifier written as `type` in the log.
    pub fn event_type(&self) -> &'static str {
        match self {
            AuditEvent::AgentDecision { .. } => "agent_decision",
            AuditEvent::ModerationCompleted { .. } => "moderation_completed",
        }
    }

    pub fn thread_url(&self) -> &str {
        match self {
            AuditEvent::AgentDecision { thread_url, .. } => thread_url,
            AuditEvent::ModerationCompleted { result } => &result.thread_url,
        }
    }
}

/// Port for logging audit events.
///
/// `log` is synchronous and infallible; logging failures never affect a
/// moderation run.
pub trait AuditLog: Send + Sync {
    fn log(&self, event: AuditEvent);
}

/// No-op implementation for tests and when audit logging is disabled.
pub struct NoAuditLog;

impl AuditLog for NoAuditLog {
    fn log(&self, _event: AuditEvent) {}
}
