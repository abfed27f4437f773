//! Application layer for threadsense
//!
//! This crate contains the moderate-thread use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ModerationParams;
pub use ports::{
    audit_log::{AuditEvent, AuditLog, NoAuditLog},
    comment_classifier::CommentClassifierPort,
    comment_source::CommentSourcePort,
    history_store::{HistoryStorePort, NoHistory},
    moderation_agent::{AgentRequest, DispatchError, ModerationAgentPort},
    progress::{ModerationProgress, NoProgress},
    shared_memory::SharedMemoryPort,
};
pub use use_cases::moderate_thread::{
    ModerateThreadError, ModerateThreadInput, ModerateThreadUseCase, UNAVAILABLE_MEMORY_ID,
    UNKNOWN_SUBREDDIT,
};
