//! Submitted-line history and the recall cursor.

use serde::{Deserialize, Serialize};

/// Position of the history recall cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoryCursor {
    /// Editing a fresh line.
    #[default]
    Idle,
    /// Showing a recalled entry, counted back from the most recent (0).
    Browsing(usize),
}

impl HistoryCursor {
    /// Signed view of the cursor: `-1` when idle, the offset otherwise.
    pub fn as_index(self) -> isize {
        match self {
            HistoryCursor::Idle => -1,
            HistoryCursor::Browsing(i) => i as isize,
        }
    }
}

/// Ordered log of submitted lines. Append-only; no de-duplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a submitted line.
    pub fn push(&mut self, line: &str) {
        self.entries.push(line.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entry at `offset` counted back from the most recent.
    fn back(&self, offset: usize) -> Option<&str> {
        let idx = self.entries.len().checked_sub(offset + 1)?;
        self.entries.get(idx).map(String::as_str)
    }

    /// Step one entry older.
    ///
    /// Returns the new cursor and the text to load into the input buffer, or
    /// `None` when there is nothing older (empty history, or already at the
    /// oldest entry).
    pub fn recall_older(&self, cursor: HistoryCursor) -> Option<(HistoryCursor, &str)> {
        let next = match cursor {
            HistoryCursor::Idle => 0,
            HistoryCursor::Browsing(i) => i + 1,
        };
        self.back(next)
            .map(|text| (HistoryCursor::Browsing(next), text))
    }

    /// Step one entry newer.
    ///
    /// Leaving the most recent entry returns to [`HistoryCursor::Idle`] with
    /// an empty buffer. Returns `None` when already idle.
    pub fn recall_newer(&self, cursor: HistoryCursor) -> Option<(HistoryCursor, &str)> {
        match cursor {
            HistoryCursor::Idle => None,
            HistoryCursor::Browsing(0) => Some((HistoryCursor::Idle, "")),
            HistoryCursor::Browsing(i) => self
                .back(i - 1)
                .map(|text| (HistoryCursor::Browsing(i - 1), text)),
        }
    }
}
