use super::types::{LogEntry, LogKind};
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;

/// Number of console entries kept; older ones are evicted first.
pub const TRANSCRIPT_CAPACITY: usize = 41;

/// Bounded, append-only console transcript shared between the UI and the
/// command pipeline.
#[derive(Debug, Clone)]
pub struct TranscriptLog {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(TRANSCRIPT_CAPACITY))),
        }
    }

    pub fn add(&self, entry: LogEntry) {
        let mut entries = self.entries.write();
        while entries.len() >= TRANSCRIPT_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Append a new entry of the given kind
    pub fn push(&self, kind: LogKind, message: impl Into<String>) {
        self.add(LogEntry::new(kind, message));
    }

    pub fn get_all(&self) -> Vec<LogEntry> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<LogEntry> {
        self.entries.read().back().cloned()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for TranscriptLog {
    fn default() -> Self {
        Self::new()
    }
}
