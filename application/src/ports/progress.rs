//! Progress notification port
//!
//! Defines the interface for reporting progress while a thread is moderated.

/// Callback for progress updates during a moderation run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinner, logs, etc.)
pub trait ModerationProgress: Send + Sync {
    /// Called once agents and the classifier are about to be dispatched
    fn on_dispatch_start(&self, agents: usize, comments: usize);

    /// Called when one agent returned, failed, or timed out
    fn on_agent_complete(&self, agent_id: &str, success: bool);

    /// Called when the classification job finished
    fn on_classification_complete(&self, _classified: usize, _success: bool) {}

    /// Called after the result has been assembled
    fn on_dispatch_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ModerationProgress for NoProgress {
    fn on_dispatch_start(&self, _agents: usize, _comments: usize) {}
    fn on_agent_complete(&self, _agent_id: &str, _success: bool) {}
    fn on_dispatch_complete(&self) {}
}
