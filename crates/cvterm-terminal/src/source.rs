//! Command sources: where the registry gets its records at startup.

use std::path::{Path, PathBuf};

use cvterm_types::config::RawCommand;
use cvterm_types::error::{Result, TermError};
use serde::Deserialize;

/// Supplies the command table, in stable declared order.
pub trait CommandSource {
    /// Fetch all command records. Failures must be reported, not panicked.
    fn fetch_commands(&self) -> Result<Vec<RawCommand>>;
}

/// An in-memory source (inline config entries, tests).
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    entries: Vec<RawCommand>,
}

impl StaticSource {
    pub fn new(entries: Vec<RawCommand>) -> Self {
        Self { entries }
    }
}

impl CommandSource for StaticSource {
    fn fetch_commands(&self) -> Result<Vec<RawCommand>> {
        Ok(self.entries.clone())
    }
}

/// TOML layout: a list of `[[commands]]` tables.
#[derive(Debug, Deserialize)]
struct CommandFile {
    #[serde(default)]
    commands: Vec<RawCommand>,
}

/// A command file on disk.
///
/// `.json` files hold a top-level array of records; anything else is read as
/// TOML with `[[commands]]` tables.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl CommandSource for FileSource {
    fn fetch_commands(&self) -> Result<Vec<RawCommand>> {
        let unavailable = |e: &dyn std::fmt::Display| {
            TermError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        };
        let text = std::fs::read_to_string(&self.path).map_err(|e| unavailable(&e))?;
        if self.is_json() {
            serde_json::from_str(&text).map_err(|e| unavailable(&e))
        } else {
            let file: CommandFile = toml::from_str(&text).map_err(|e| unavailable(&e))?;
            Ok(file.commands)
        }
    }
}
