//! Scrollback entries: what the user typed and what the terminal answered.

use serde::{Deserialize, Serialize};

/// Which side of the conversation an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A submitted input line.
    Command,
    /// Terminal output.
    Response,
}

/// A single rendered scrollback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollbackEntry {
    pub kind: EntryKind,
    pub text: String,
}

impl ScrollbackEntry {
    /// A submitted command line.
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Command,
            text: text.into(),
        }
    }

    /// Terminal output.
    pub fn response(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Response,
            text: text.into(),
        }
    }

    /// Display lines. Embedded newlines render as separate lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}
