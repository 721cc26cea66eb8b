//! Command records and the name-keyed registry.

use std::collections::HashMap;

use cvterm_types::config::RawCommand;

/// A user-defined command with a canned response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Lowercase name (what the user types).
    pub name: String,
    /// One-line description for `help`.
    pub description: String,
    /// Text shown verbatim when the command runs. May span several lines.
    pub response: String,
}

impl Command {
    /// Normalize a raw source record.
    ///
    /// The name is trimmed and lowercased, falling back to the record `id`
    /// when the name is missing or blank. Returns `None` when neither yields
    /// a usable name.
    pub fn from_raw(raw: &RawCommand) -> Option<Self> {
        let name = [raw.name.as_deref(), raw.id.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())?
            .to_lowercase();
        Some(Self {
            name,
            description: raw.description.clone().unwrap_or_default(),
            response: raw.response.clone().unwrap_or_default(),
        })
    }
}

/// Registry of available commands.
///
/// Keys are lowercase names. The declared order of the source is kept for
/// `help` listings and completion candidates.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
    order: Vec<String>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from raw source records.
    ///
    /// Duplicate names: the last record wins, keeping the listing position
    /// of the first occurrence.
    pub fn load(raw: Vec<RawCommand>) -> Self {
        let mut reg = Self::new();
        for entry in raw {
            match Command::from_raw(&entry) {
                Some(cmd) => reg.register(cmd),
                None => log::warn!("Skipping command entry without a name: {entry:?}"),
            }
        }
        log::info!("Loaded {} commands", reg.len());
        reg
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, mut cmd: Command) {
        cmd.name = cmd.name.to_lowercase();
        if self.commands.contains_key(&cmd.name) {
            log::debug!("Command '{}' redefined; last definition wins", cmd.name);
        } else {
            self.order.push(cmd.name.clone());
        }
        self.commands.insert(cmd.name.clone(), cmd);
    }

    /// Look up a command by name (case-insensitive).
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(&name.to_lowercase())
    }

    /// All command names in declared order.
    pub fn all_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Iterate over commands in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry holds no commands.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Return completions for a partial command name, in declared order.
    pub fn completions(&self, partial: &str) -> Vec<&str> {
        let lower = partial.to_lowercase();
        self.order
            .iter()
            .filter(|name| name.starts_with(&lower))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str) -> RawCommand {
        RawCommand::new(name, &format!("{name} description"), &format!("{name} response"))
    }

    #[test]
    fn default_creates_empty_registry() {
        let reg = CommandRegistry::default();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
        assert!(reg.all_names().is_empty());
        assert!(reg.lookup("anything").is_none());
    }

    #[test]
    fn load_lowercases_names() {
        let reg = CommandRegistry::load(vec![raw("Skills")]);
        assert_eq!(reg.all_names(), vec!["skills"]);
        assert!(reg.lookup("skills").is_some());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let reg = CommandRegistry::load(vec![raw("ping")]);
        assert_eq!(reg.lookup("PING").map(|c| c.name.as_str()), Some("ping"));
        assert_eq!(reg.lookup("Ping").map(|c| c.name.as_str()), Some("ping"));
    }

    #[test]
    fn missing_name_falls_back_to_id() {
        let entry = RawCommand {
            id: Some("Contact".into()),
            ..RawCommand::default()
        };
        let reg = CommandRegistry::load(vec![entry]);
        assert_eq!(reg.all_names(), vec!["contact"]);
    }

    #[test]
    fn blank_name_falls_back_to_id() {
        let entry = RawCommand {
            id: Some("doc42".into()),
            name: Some("   ".into()),
            ..RawCommand::default()
        };
        let reg = CommandRegistry::load(vec![entry]);
        assert_eq!(reg.all_names(), vec!["doc42"]);
    }

    #[test]
    fn entry_without_name_or_id_is_skipped() {
        let reg = CommandRegistry::load(vec![RawCommand::default(), raw("ok")]);
        assert_eq!(reg.all_names(), vec!["ok"]);
    }

    #[test]
    fn from_raw_borrows_the_record() {
        let entry = raw("  About ");
        let cmd = Command::from_raw(&entry).unwrap();
        assert_eq!(cmd.name, "about");
        assert_eq!(cmd.response, "  About  response");
        assert_eq!(entry.name.as_deref(), Some("  About "));
        assert!(Command::from_raw(&RawCommand::default()).is_none());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let entry = RawCommand {
            name: Some("bare".into()),
            ..RawCommand::default()
        };
        let reg = CommandRegistry::load(vec![entry]);
        let cmd = reg.lookup("bare").unwrap();
        assert_eq!(cmd.description, "");
        assert_eq!(cmd.response, "");
    }

    #[test]
    fn declared_order_is_preserved() {
        let reg = CommandRegistry::load(vec![raw("zeta"), raw("alpha"), raw("mid")]);
        assert_eq!(reg.all_names(), vec!["zeta", "alpha", "mid"]);
        let names: Vec<&str> = reg.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_names_last_writer_wins() {
        let reg = CommandRegistry::load(vec![
            RawCommand::new("about", "first", "one"),
            raw("skills"),
            RawCommand::new("ABOUT", "second", "two"),
        ]);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.all_names(), vec!["about", "skills"]);
        let cmd = reg.lookup("about").unwrap();
        assert_eq!(cmd.description, "second");
        assert_eq!(cmd.response, "two");
    }

    #[test]
    fn register_normalizes_name() {
        let mut reg = CommandRegistry::new();
        reg.register(Command {
            name: "MiXeD".into(),
            description: String::new(),
            response: String::new(),
        });
        assert_eq!(reg.all_names(), vec!["mixed"]);
    }

    #[test]
    fn completions_prefix_in_declared_order() {
        let reg = CommandRegistry::load(vec![raw("build"), raw("about"), raw("bio")]);
        assert_eq!(reg.completions("b"), vec!["build", "bio"]);
        assert_eq!(reg.completions("BU"), vec!["build"]);
    }

    #[test]
    fn completions_empty_prefix_matches_all() {
        let reg = CommandRegistry::load(vec![raw("a"), raw("b")]);
        assert_eq!(reg.completions(""), vec!["a", "b"]);
    }

    #[test]
    fn completions_no_match() {
        let reg = CommandRegistry::load(vec![raw("echo")]);
        assert!(reg.completions("xyz").is_empty());
    }
}
