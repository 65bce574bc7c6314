//! Append-only archive of past execution results.
//!
//! Archival is for audit and comparison: entries are never edited,
//! reordered, removed, or re-run. Fold state lives in a separate panel
//! type because it is transient presentation state, not data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlscope_core::{ChartType, Row};

use crate::spec::ChartSpec;

/// An archived snapshot of one past execution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub chart: ChartSpec,
    pub rows: Vec<Row>,
    pub generated_sql: String,
    pub chart_type: ChartType,
    pub archived_at: DateTime<Utc>,
}

/// Ordered list of archived entries. `append` is the only mutator.
#[derive(Debug, Default)]
pub struct HistoryArchive {
    entries: Vec<HistoryEntry>,
}

impl HistoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the tail.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-entry fold toggles for displaying an archive.
///
/// Owned by the presentation layer; dropping or resetting a panel never
/// affects the archive itself. New entries start folded.
#[derive(Debug, Default)]
pub struct HistoryPanel {
    folded: Vec<bool>,
}

impl HistoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the fold list to match the archive length; new slots fold.
    pub fn sync(&mut self, archive_len: usize) {
        while self.folded.len() < archive_len {
            self.folded.push(true);
        }
    }

    /// Flip one entry's fold state; no-op for unknown indexes.
    pub fn toggle(&mut self, index: usize) {
        if let Some(folded) = self.folded.get_mut(index) {
            *folded = !*folded;
        }
    }

    /// Unknown indexes read as folded.
    pub fn is_folded(&self, index: usize) -> bool {
        self.folded.get(index).copied().unwrap_or(true)
    }
}
