//! Application-level configuration.
//!
//! - [`ModerationParams`]: dispatch timeouts and comment limits

pub mod moderation_params;

pub use moderation_params::ModerationParams;
