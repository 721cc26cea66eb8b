//! Usage sinks: best-effort collectors of command-invocation events.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cvterm_types::error::{Result, TermError};

use crate::dispatch::UsageEvent;

/// Receives one call per successfully dispatched registry command.
///
/// Errors are reported to the caller, which logs and discards them.
pub trait UsageSink {
    fn record_usage(&self, command_name: &str) -> Result<()>;
}

impl<T: UsageSink + ?Sized> UsageSink for Rc<T> {
    fn record_usage(&self, command_name: &str) -> Result<()> {
        (**self).record_usage(command_name)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl UsageSink for NullSink {
    fn record_usage(&self, _command_name: &str) -> Result<()> {
        Ok(())
    }
}

/// Keeps events in memory and tallies them.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: RefCell<Vec<UsageEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> Vec<UsageEvent> {
        self.events.borrow().clone()
    }

    /// Invocation count per command name.
    pub fn counts(&self) -> HashMap<String, usize> {
        count_events(self.events.borrow().iter())
    }

    /// The `n` most used commands, by count descending then name.
    pub fn most_used(&self, n: usize) -> Vec<(String, usize)> {
        top_n(self.counts(), n)
    }
}

fn count_events<'a>(events: impl Iterator<Item = &'a UsageEvent>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for ev in events {
        *counts.entry(ev.command_name.clone()).or_insert(0) += 1;
    }
    counts
}

fn top_n(counts: HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut tally: Vec<(String, usize)> = counts.into_iter().collect();
    tally.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tally.truncate(n);
    tally
}

impl UsageSink for MemorySink {
    fn record_usage(&self, command_name: &str) -> Result<()> {
        self.events.borrow_mut().push(UsageEvent {
            command_name: command_name.to_lowercase(),
        });
        Ok(())
    }
}

/// Appends one JSON object per event to a file.
#[derive(Debug, Clone)]
pub struct JsonlFileSink {
    path: PathBuf,
}

impl JsonlFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Events recorded in the log so far, oldest first.
    ///
    /// A missing file holds no events. Lines that do not parse are skipped.
    pub fn events(&self) -> Result<Vec<UsageEvent>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut events = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<UsageEvent>(line) {
                Ok(ev) => events.push(ev),
                Err(e) => log::warn!(
                    "{}:{}: skipping usage line: {e}",
                    self.path.display(),
                    idx + 1
                ),
            }
        }
        Ok(events)
    }

    /// The `n` most used commands in the log, by count descending then name.
    pub fn most_used(&self, n: usize) -> Result<Vec<(String, usize)>> {
        let events = self.events()?;
        Ok(top_n(count_events(events.iter()), n))
    }
}

impl UsageSink for JsonlFileSink {
    fn record_usage(&self, command_name: &str) -> Result<()> {
        let event = UsageEvent {
            command_name: command_name.to_string(),
        };
        let line = serde_json::to_string(&event)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| TermError::SinkFailure(format!("{}: {e}", self.path.display())))?;
        writeln!(file, "{line}")
            .map_err(|e| TermError::SinkFailure(format!("{}: {e}", self.path.display())))
    }
}
