//! Session history of successful calculations.
//!
//! Append-only within a session: entries are only ever added at the end or
//! cleared all at once. Nothing is persisted across restarts.

mod entry;

pub use entry::HistoryEntry;

use std::collections::VecDeque;

/// Placeholder shown when there is nothing to list.
pub const EMPTY_HISTORY_TEXT: &str = "No history available.";

/// Chronological list of [`HistoryEntry`] values, oldest first.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    /// When set, the oldest entries are dropped past this many.
    limit: Option<usize>,
}

impl History {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` entries.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    /// Append an entry, dropping the oldest ones if a limit is set.
    pub fn record(&mut self, entry: HistoryEntry) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.entries.len() >= limit {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(entry);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entries newest first, the order the history panel uses.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Owned snapshot, oldest first.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Lines for the history panel, newest first.
    pub fn display_lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![EMPTY_HISTORY_TEXT.to_string()];
        }
        self.iter_newest_first().map(HistoryEntry::display).collect()
    }

    /// Serialize the entries (oldest first) as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }
}
