//! Bounded in-memory history of moderation runs

use std::collections::VecDeque;
use std::sync::Mutex;
use threadsense_application::HistoryStorePort;
use threadsense_domain::HistoryEntry;

#[derive(Default)]
struct Entries {
    /// Newest first
    items: VecDeque<HistoryEntry>,
    next_id: u64,
}

/// Append-only history keeping the newest `retention` entries
///
/// Entries are lost on restart.
pub struct InMemoryHistoryStore {
    retention: usize,
    entries: Mutex<Entries>,
}

impl InMemoryHistoryStore {
    pub fn new(retention: usize) -> Self {
        Self {
            retention,
            entries: Mutex::new(Entries {
                items: VecDeque::with_capacity(retention),
                next_id: 1,
            }),
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoryStorePort for InMemoryHistoryStore {
    fn append(&self, mut entry: HistoryEntry) -> HistoryEntry {
        let Ok(mut entries) = self.entries.lock() else {
            return entry;
        };
        entry.id = entries.next_id;
        entries.next_id += 1;

        if self.retention > 0 {
            entries.items.push_front(entry.clone());
            entries.items.truncate(self.retention);
        }
        entry
    }

    fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .map(|e| e.items.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    fn for_thread(&self, thread_url: &str) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .map(|e| {
                e.items
                    .iter()
                    .filter(|entry| entry.thread_url == thread_url)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
