use cvterm_terminal::{Session, SessionState};
use cvterm_types::config::TerminalConfig;

use crate::setup;

/// All mutable front-end state.
pub struct AppState {
    pub config: TerminalConfig,
    pub session: Session,
    /// Number of scrollback entries already written to the screen.
    pub rendered: usize,
}

impl AppState {
    /// Build the session (banner and usage sink) from the configuration.
    /// The registry stays empty until [`AppState::load_commands`].
    pub fn new(config: TerminalConfig) -> Self {
        let initial = match config.banner() {
            Some(banner) => SessionState::with_banner(banner),
            None => SessionState::new(),
        };
        let session = Session::new(initial, setup::usage_sink(&config));
        Self {
            config,
            session,
            rendered: 0,
        }
    }

    /// One-time registry load from the configured command source.
    pub fn load_commands(&mut self) {
        let source = setup::command_source(&self.config);
        self.session.load_commands(source.as_ref());
        log::info!(
            "Terminal ready with {} commands",
            self.session.registry().len()
        );
    }
}
