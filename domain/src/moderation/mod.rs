//! Moderation verdict domain
//!
//! Turns independent agent judgments and per-comment labels into one
//! canonical thread-level result.
//!
//! # Pipeline
//!
//! ```text
//! raw AgentDecision[] ──► label::normalize ──► verdict::VerdictAggregator ──┐
//!                                                                         ├──► result::ModerationResultBuilder
//! CommentClassification[] ──► verdict::VerdictBreakdown ──────────────────┘
//! ```
//!
//! The agent-level verdict and the comment-level breakdown are separate
//! signals and are never reconciled into a single number.

pub mod decision;
pub mod history;
pub mod label;
pub mod parsing;
pub mod result;
pub mod roster;
pub mod verdict;

pub use decision::{AgentDecision, CommentClassification};
pub use history::HistoryEntry;
pub use label::ModerationLabel;
pub use parsing::{ParsedVerdict, parse_agent_verdict, parse_comment_labels};
pub use result::{AssemblyError, ModerationResult, ModerationResultBuilder};
pub use roster::{AgentProfile, AgentRoster, AgentScope, AgentSelection, RosterError};
pub use verdict::{FinalDecision, VerdictAggregator, VerdictBreakdown};
