//! Scrollback rendering to a byte stream.

use std::io::{self, Write};

use cvterm_terminal::{EntryKind, ScrollbackEntry};

use crate::app_state::AppState;

/// ANSI clear screen + cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Write one entry: commands after the prompt, responses line by line.
pub fn render_entry(
    entry: &ScrollbackEntry,
    prompt: &str,
    out: &mut impl Write,
) -> io::Result<()> {
    match entry.kind {
        EntryKind::Command => writeln!(out, "{prompt} {}", entry.text),
        EntryKind::Response => {
            for line in entry.lines() {
                writeln!(out, "{line}")?;
            }
            Ok(())
        },
    }
}

/// Write entries appended since the last call. A shrunken scrollback means
/// it was cleared, so the screen is cleared first.
pub fn render_new(state: &mut AppState, out: &mut impl Write) -> io::Result<()> {
    let scrollback = state.session.state().scrollback();
    if scrollback.len() < state.rendered {
        out.write_all(CLEAR_SCREEN.as_bytes())?;
        state.rendered = 0;
    }
    for entry in &scrollback[state.rendered..] {
        render_entry(entry, &state.config.prompt, out)?;
    }
    state.rendered = scrollback.len();
    Ok(())
}

/// Write the prompt and the live input buffer, without a newline.
pub fn render_prompt(state: &AppState, out: &mut impl Write) -> io::Result<()> {
    let input = state.session.state().input();
    write!(out, "{} {input}", state.config.prompt)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvterm_types::config::TerminalConfig;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    fn quiet_state() -> AppState {
        AppState::new(TerminalConfig {
            welcome: String::new(),
            ..TerminalConfig::default()
        })
    }

    #[test]
    fn command_entry_has_prompt() {
        let mut buf = Vec::new();
        render_entry(&ScrollbackEntry::command("help"), "$", &mut buf).unwrap();
        assert_eq!(output(buf), "$ help\n");
    }

    #[test]
    fn response_entry_splits_lines() {
        let mut buf = Vec::new();
        render_entry(&ScrollbackEntry::response("a\nb"), "$", &mut buf).unwrap();
        assert_eq!(output(buf), "a\nb\n");
    }

    #[test]
    fn render_new_writes_only_unseen_entries() {
        let mut state = quiet_state();
        state.session.submit("help");
        let mut buf = Vec::new();
        render_new(&mut state, &mut buf).unwrap();
        assert_eq!(output(buf), "user@cv:~$ help\nNo available commands.\n");
        assert_eq!(state.rendered, 2);

        let mut buf: Vec<u8> = Vec::new();
        render_new(&mut state, &mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn render_new_clears_screen_after_clear() {
        let mut state = quiet_state();
        state.session.submit("help");
        render_new(&mut state, &mut Vec::<u8>::new()).unwrap();
        state.session.submit("clear");
        let mut buf = Vec::new();
        render_new(&mut state, &mut buf).unwrap();
        assert_eq!(output(buf), CLEAR_SCREEN);
        assert_eq!(state.rendered, 0);
    }

    #[test]
    fn prompt_shows_pending_input() {
        let mut state = quiet_state();
        let mut buf = Vec::new();
        render_prompt(&state, &mut buf).unwrap();
        assert_eq!(output(buf), "user@cv:~$ ");

        state.session.set_input("ab");
        let mut buf = Vec::new();
        render_prompt(&state, &mut buf).unwrap();
        assert_eq!(output(buf), "user@cv:~$ ab");
    }
}
