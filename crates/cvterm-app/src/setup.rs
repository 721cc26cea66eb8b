//! Collaborator wiring: pick the command source and usage sink from config.

use cvterm_terminal::{
    CommandSource, FileSource, JsonlFileSink, NullSink, StaticSource, UsageSink,
};
use cvterm_types::config::TerminalConfig;

/// A file source when `commands_file` is set, the inline list otherwise.
pub fn command_source(config: &TerminalConfig) -> Box<dyn CommandSource> {
    match &config.commands_file {
        Some(path) => {
            let source = FileSource::new(path);
            log::info!("Loading commands from {}", source.path().display());
            Box::new(source)
        },
        None => Box::new(StaticSource::new(config.commands.clone())),
    }
}

/// A JSON-lines log when `usage_log` is set, a null sink otherwise.
pub fn usage_sink(config: &TerminalConfig) -> Box<dyn UsageSink> {
    match &config.usage_log {
        Some(path) => {
            let sink = JsonlFileSink::new(path);
            log::info!("Recording usage to {}", sink.path().display());
            Box::new(sink)
        },
        None => Box::new(NullSink),
    }
}

/// One-line summary of the most used commands in the usage log, if there is
/// a log with anything in it.
pub fn usage_summary(config: &TerminalConfig, top: usize) -> Option<String> {
    let sink = JsonlFileSink::new(config.usage_log.as_ref()?);
    let tally = match sink.most_used(top) {
        Ok(tally) => tally,
        Err(e) => {
            log::warn!("Cannot read usage log {}: {e}", sink.path().display());
            return None;
        },
    };
    if tally.is_empty() {
        return None;
    }
    let listed: Vec<String> = tally
        .iter()
        .map(|(name, count)| format!("{name} ({count})"))
        .collect();
    Some(format!("Most used commands: {}", listed.join(", ")))
}
