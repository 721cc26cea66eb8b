//! Terminal configuration, loaded from TOML.
//!
//! ```toml
//! prompt = "guest@cv:~$"
//! welcome = "Hello.\nType 'help' to see available commands."
//! commands_file = "commands.toml"
//! usage_log = "usage.jsonl"
//!
//! [[commands]]
//! name = "about"
//! description = "Who am I"
//! response = "A developer."
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};

/// Default prompt shown before command entries and the input line.
pub const DEFAULT_PROMPT: &str = "user@cv:~$";

/// Default banner shown as the first response entry of a session.
pub const DEFAULT_WELCOME: &str =
    "Welcome to the CV Terminal.\nType 'help' to see available commands.";

/// A command record as declared by a command source, before normalization.
///
/// Every field is optional: sources are schema-less and the registry decides
/// how to fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommand {
    /// Source-side identifier, used as the name when `name` is missing.
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub response: Option<String>,
}

impl RawCommand {
    /// Convenience constructor for a fully specified entry.
    pub fn new(name: &str, description: &str, response: &str) -> Self {
        Self {
            id: None,
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            response: Some(response.to_string()),
        }
    }
}

/// Top-level terminal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Prompt rendered before command entries and the live input line.
    pub prompt: String,
    /// Banner shown as the first response entry. Empty disables it.
    pub welcome: String,
    /// Path to a `.toml` or `.json` command file.
    pub commands_file: Option<PathBuf>,
    /// Path to the JSON-lines usage log.
    pub usage_log: Option<PathBuf>,
    /// Inline commands, used when `commands_file` is not set.
    pub commands: Vec<RawCommand>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            welcome: DEFAULT_WELCOME.to_string(),
            commands_file: None,
            usage_log: None,
            commands: Vec::new(),
        }
    }
}

impl TerminalConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| TermError::Config(format!("{e}")))
    }

    /// Load a configuration file.
    ///
    /// Relative `commands_file` and `usage_log` paths are resolved against
    /// the directory containing the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| TermError::Config(format!("{}: {e}", path.display())))?;
        let mut config = Self::from_toml(&text)
            .map_err(|e| TermError::Config(format!("{}: {e}", path.display())))?;
        if let Some(base) = path.parent() {
            config.commands_file = config.commands_file.map(|p| base.join(p));
            config.usage_log = config.usage_log.map(|p| base.join(p));
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The welcome banner, or `None` when disabled.
    pub fn banner(&self) -> Option<&str> {
        if self.welcome.is_empty() {
            None
        } else {
            Some(&self.welcome)
        }
    }
}
