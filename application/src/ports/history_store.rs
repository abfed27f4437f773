//! History store port
//!
//! Append-only record of past moderation runs, keyed by thread URL. The
//! retention cap belongs to the implementation and is set by configuration.

use threadsense_domain::HistoryEntry;

pub trait HistoryStorePort: Send + Sync {
    /// Append an entry; returns it with its assigned id.
    fn append(&self, entry: HistoryEntry) -> HistoryEntry;

    /// Most recent entries first, at most `limit`.
    fn recent(&self, limit: usize) -> Vec<HistoryEntry>;

    /// All retained entries for one thread, most recent first.
    fn for_thread(&self, thread_url: &str) -> Vec<HistoryEntry>;
}

/// No-op implementation for tests and when history is disabled.
pub struct NoHistory;

impl HistoryStorePort for NoHistory {
    fn append(&self, entry: HistoryEntry) -> HistoryEntry {
        entry
    }

    fn recent(&self, _limit: usize) -> Vec<HistoryEntry> {
        Vec::new()
    }

    fn for_thread(&self, _thread_url: &str) -> Vec<HistoryEntry> {
        Vec::new()
    }
}
