//! Infrastructure layer for threadsense
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod chat;
pub mod config;
pub mod logging;
pub mod memory;
pub mod moderation;
pub mod reddit;

// Re-export commonly used types
pub use chat::{ChatBackend, ChatMessage, DemoChatBackend, OpenAiCompatibleBackend};
pub use config::{
    BackendProvider, ConfigLoader, FileBackendConfig, FileConfig, FileHistoryConfig,
    FileLoggingConfig, FileModerationConfig, FileOutputConfig, FileServerConfig,
};
pub use logging::JsonlAuditLogger;
pub use memory::{InMemoryHistoryStore, InMemorySharedMemory};
pub use moderation::{LlmCommentClassifier, LlmModerationAgent};
pub use reddit::{DemoCommentSource, RedditCommentSource};
