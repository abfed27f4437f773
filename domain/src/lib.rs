//! Domain layer for threadsense
//!
//! This crate contains the moderation model: canonical labels, the decision
//! normalizer, the verdict aggregator and the result assembler. It has no
//! dependencies on infrastructure or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Agent decisions
//!
//! Several moderation agents judge a thread independently. Each emits a
//! decision in its own vocabulary; [`ModerationLabel::normalize`] maps it
//! onto `VIOLATION > NEEDS_WARNING > FINE` (plus the non-comparable `ERROR`).
//!
//! ## Final decision
//!
//! [`VerdictAggregator`] escalates to the most severe valid label and reports
//! the mean confidence of the agents that voted for it.
//!
//! ## Comment breakdown
//!
//! Per-comment labels are tallied into a [`VerdictBreakdown`], independently
//! of the agent verdict.

pub mod config;
pub mod core;
pub mod moderation;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use self::core::{error::DomainError, string::excerpt, thread_url::ThreadUrl};
pub use moderation::{
    AgentDecision, AgentProfile, AgentRoster, AgentScope, AgentSelection, AssemblyError,
    CommentClassification, FinalDecision, HistoryEntry, ModerationLabel, ModerationResult,
    ModerationResultBuilder, ParsedVerdict, RosterError, VerdictAggregator, VerdictBreakdown,
    parse_agent_verdict, parse_comment_labels,
};
