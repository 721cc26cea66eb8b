//! CV terminal entry point.
//!
//! Line-mode front end over stdin/stdout. Type a command and press Enter.
//! Tab completes command names and the arrow keys recall history: finish the
//! line with Enter to see the completed or recalled text at the prompt, then
//! press Enter again to run it. EOF (Ctrl-D) quits and, when a usage log is
//! configured, prints the most used commands.
//!
//! The configuration path comes from the first CLI argument or the
//! `CVTERM_CONFIG` environment variable; without either, built-in defaults
//! are used.

mod app_state;
mod input;
mod render;
mod setup;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use app_state::AppState;
use cvterm_types::config::TerminalConfig;

/// Commands listed in the usage summary printed on exit.
const USAGE_SUMMARY_TOP: usize = 5;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CVTERM_CONFIG").ok())
    {
        Some(path) => TerminalConfig::load(Path::new(&path))
            .with_context(|| format!("loading config {path}"))?,
        None => TerminalConfig::default(),
    };
    log::info!("Starting CV terminal");

    let mut state = AppState::new(config);
    state.load_commands();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    render::render_new(&mut state, &mut stdout)?;
    render::render_prompt(&state, &mut stdout)?;

    let mut raw = Vec::new();
    while let Some(line) = input::read_line_lossy(&mut stdin.lock(), &mut raw)? {
        input::handle_line(&line, &mut state, &mut stdout)?;
    }

    writeln!(stdout)?;
    if let Some(summary) = setup::usage_summary(&state.config, USAGE_SUMMARY_TOP) {
        writeln!(stdout, "{summary}")?;
    }
    log::info!("CV terminal shut down cleanly");
    Ok(())
}
