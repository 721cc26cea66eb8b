//! Command dispatch: built-ins first, then the registry.

use serde::{Deserialize, Serialize};

use crate::registry::CommandRegistry;
use crate::scrollback::ScrollbackEntry;

/// Response when `help` runs against an empty registry.
pub const NO_COMMANDS: &str = "No available commands.";

/// Heading of the `help` listing.
pub const HELP_HEADER: &str = "Available commands:";

/// Response for a registry command with an empty response text.
pub const NO_RESPONSE: &str = "No response defined.";

/// Commands handled before any registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Clear,
    Help,
}

impl Builtin {
    /// Resolve a lowercased command word to a built-in.
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "clear" => Some(Builtin::Clear),
            "help" => Some(Builtin::Help),
            _ => None,
        }
    }
}

/// Outbound notification that a registry command ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub command_name: String,
}

/// Response text for an unrecognized command word.
pub fn not_recognized(word: &str) -> String {
    format!("'{word}' is not recognized. Type 'help' to see available commands.")
}

/// Build the `help` listing.
pub fn help_text(registry: &CommandRegistry) -> String {
    if registry.is_empty() {
        return NO_COMMANDS.to_string();
    }
    let mut out = HELP_HEADER.to_string();
    for cmd in registry.iter() {
        out.push('\n');
        out.push_str(&format!("{} - {}", cmd.name, cmd.description));
    }
    out
}

/// Dispatch a lowercased command word against the scrollback.
///
/// Returns a usage event when a registry command was found. Built-ins never
/// produce usage events.
pub fn dispatch(
    word: &str,
    registry: &CommandRegistry,
    scrollback: &mut Vec<ScrollbackEntry>,
) -> Option<UsageEvent> {
    match Builtin::parse(word) {
        Some(Builtin::Clear) => {
            scrollback.clear();
            None
        },
        Some(Builtin::Help) => {
            scrollback.push(ScrollbackEntry::response(help_text(registry)));
            None
        },
        None => match registry.lookup(word) {
            Some(cmd) => {
                let text = if cmd.response.is_empty() {
                    NO_RESPONSE
                } else {
                    cmd.response.as_str()
                };
                scrollback.push(ScrollbackEntry::response(text));
                Some(UsageEvent {
                    command_name: word.to_string(),
                })
            },
            None => {
                log::debug!("Unrecognized command: {word}");
                scrollback.push(ScrollbackEntry::response(not_recognized(word)));
                None
            },
        },
    }
}
