//! The line interpreter: scrollback, input buffer, history recall, and
//! tab completion.
//!
//! [`SessionState`] is plain serializable data. Its event handlers take the
//! registry by reference and hand back usage events instead of emitting them.
//! [`Session`] owns a state, a registry, and a usage sink, and delivers those
//! events after each state change has been committed.

use cvterm_types::input::Key;
use serde::{Deserialize, Serialize};

use crate::dispatch::{self, UsageEvent};
use crate::history::{CommandHistory, HistoryCursor};
use crate::registry::CommandRegistry;
use crate::scrollback::ScrollbackEntry;
use crate::sink::UsageSink;
use crate::source::CommandSource;

/// Separator between ambiguous completion candidates.
pub const COMPLETION_SEPARATOR: &str = "    ";

/// What the front end should do with the key after the interpreter saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The interpreter consumed the key; suppress default field behavior.
    Handled,
    /// Not an interpreter key; let the normal input binding handle it.
    Passthrough,
}

/// All mutable interpreter state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    scrollback: Vec<ScrollbackEntry>,
    history: CommandHistory,
    cursor: HistoryCursor,
    input: String,
}

impl SessionState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose scrollback opens with a welcome response.
    pub fn with_banner(banner: &str) -> Self {
        let mut state = Self::new();
        state.push_response(banner);
        state
    }

    /// Rendered entries, oldest first.
    pub fn scrollback(&self) -> &[ScrollbackEntry] {
        &self.scrollback
    }

    /// Submitted lines, oldest first.
    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    /// The live input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the live input buffer (the normal typing path).
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Append a response entry.
    pub fn push_response(&mut self, text: &str) {
        self.scrollback.push(ScrollbackEntry::response(text));
    }

    /// Submit a line.
    ///
    /// Blank lines (after trimming) leave every part of the state untouched.
    pub fn submit(&mut self, line: &str, registry: &CommandRegistry) -> Option<UsageEvent> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.scrollback.push(ScrollbackEntry::command(trimmed));
        self.history.push(trimmed);
        self.cursor = HistoryCursor::Idle;
        let event = dispatch::dispatch(&trimmed.to_lowercase(), registry, &mut self.scrollback);
        self.input.clear();
        event
    }

    /// React to a key press against the current input buffer.
    pub fn handle_key(&mut self, key: Key, registry: &CommandRegistry) -> KeyAction {
        match key {
            Key::Tab => self.complete(registry),
            Key::ArrowUp | Key::ArrowDown => {
                let recalled = if key == Key::ArrowUp {
                    self.history.recall_older(self.cursor)
                } else {
                    self.history.recall_newer(self.cursor)
                };
                if let Some((cursor, text)) = recalled {
                    self.input = text.to_string();
                    self.cursor = cursor;
                    log::debug!("History cursor at {}", cursor.as_index());
                }
            },
            _ => return KeyAction::Passthrough,
        }
        KeyAction::Handled
    }

    /// Tab completion: a unique candidate replaces the buffer, several are
    /// listed in the scrollback, none is a no-op.
    fn complete(&mut self, registry: &CommandRegistry) {
        let matches = registry.completions(&self.input);
        match matches.as_slice() {
            [] => {},
            [only] => self.input = (*only).to_string(),
            many => self.push_response(&many.join(COMPLETION_SEPARATOR)),
        }
    }
}

/// An interactive session: state plus its collaborators.
pub struct Session {
    state: SessionState,
    registry: CommandRegistry,
    sink: Box<dyn UsageSink>,
}

impl Session {
    /// Start a session with an empty registry.
    pub fn new(state: SessionState, sink: Box<dyn UsageSink>) -> Self {
        Self {
            state,
            registry: CommandRegistry::new(),
            sink,
        }
    }

    /// Load the registry from a command source.
    ///
    /// On failure the registry stays empty and a single response entry
    /// reports the reason. There is no retry.
    pub fn load_commands(&mut self, source: &dyn CommandSource) {
        match source.fetch_commands() {
            Ok(raw) => self.registry = CommandRegistry::load(raw),
            Err(e) => {
                log::warn!("Error fetching commands: {e}");
                self.registry = CommandRegistry::new();
                self.state
                    .push_response(&format!("Error fetching commands: {e}"));
            },
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Replace the live input buffer.
    pub fn set_input(&mut self, text: &str) {
        self.state.set_input(text);
    }

    /// Submit a line and deliver any resulting usage event.
    pub fn submit(&mut self, line: &str) {
        if let Some(event) = self.state.submit(line, &self.registry) {
            self.deliver(&event);
        }
    }

    /// React to a key press.
    pub fn handle_key(&mut self, key: Key) -> KeyAction {
        self.state.handle_key(key, &self.registry)
    }

    fn deliver(&self, event: &UsageEvent) {
        if let Err(e) = self.sink.record_usage(&event.command_name) {
            log::warn!("Dropping usage event for '{}': {e}", event.command_name);
        }
    }
}
