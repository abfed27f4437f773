//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod audit_log;
pub mod comment_classifier;
pub mod comment_source;
pub mod history_store;
pub mod moderation_agent;
pub mod progress;
pub mod shared_memory;
