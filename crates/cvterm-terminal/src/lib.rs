//! Line interpreter for the CV terminal.
//!
//! Commands are plain records loaded once from a [`CommandSource`] into a
//! [`CommandRegistry`]. A [`Session`] consumes submitted lines and key
//! presses, dispatches built-ins (`help`, `clear`) ahead of registry
//! commands, recalls history with the arrow keys, and completes command
//! names on Tab. Each successful registry command is reported to a
//! [`UsageSink`].

mod dispatch;
mod history;
mod registry;
mod scrollback;
mod session;
pub mod sink;
pub mod source;

/// Built-in command names.
pub use dispatch::Builtin;
/// Outbound notification that a registry command ran.
pub use dispatch::UsageEvent;
/// Canned response texts.
pub use dispatch::{HELP_HEADER, NO_COMMANDS, NO_RESPONSE};
/// Submitted-line history and the recall cursor.
pub use history::{CommandHistory, HistoryCursor};
/// A command record and the registry holding them.
pub use registry::{Command, CommandRegistry};
/// A rendered scrollback entry.
pub use scrollback::{EntryKind, ScrollbackEntry};
/// The interpreter state machine and its driver.
pub use session::{COMPLETION_SEPARATOR, KeyAction, Session, SessionState};
/// Usage sinks (null, in-memory tally, JSON-lines file).
pub use sink::{JsonlFileSink, MemorySink, NullSink, UsageSink};
/// Command sources (static list, TOML/JSON file).
pub use source::{CommandSource, FileSource, StaticSource};

pub use cvterm_types::config::RawCommand;
pub use cvterm_types::input::Key;
