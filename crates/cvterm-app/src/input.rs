use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use cvterm_terminal::{Key, KeyAction};
use cvterm_types::input::decode_keys;

use crate::app_state::AppState;
use crate::render;

/// What happened to the input buffer at the end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineResult {
    /// The buffer was submitted.
    Submitted,
    /// The line ended on Tab or an arrow key; the buffer carries over.
    Pending,
    /// The line held no Enter (EOF without a trailing newline).
    Unterminated,
}

/// Read one line into `buf`, replacing invalid UTF-8 instead of failing.
///
/// Returns `None` at EOF. The line ending is kept.
pub fn read_line_lossy<'a>(
    reader: &mut impl BufRead,
    buf: &'a mut Vec<u8>,
) -> io::Result<Option<Cow<'a, str>>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf)))
}

/// Feed one cooked-mode line from stdin through the interpreter.
///
/// Printable keys extend the buffer and Backspace trims it. Tab and the
/// arrow keys go to the interpreter. Enter submits the buffer, unless the
/// key before it was Tab or an arrow: then the recalled or completed text is
/// shown at the prompt so the user can edit or confirm it on the next line.
pub fn handle_line(
    line: &str,
    state: &mut AppState,
    out: &mut impl Write,
) -> io::Result<LineResult> {
    let (body, terminated) = match line.strip_suffix('\n') {
        Some(body) => (body.strip_suffix('\r').unwrap_or(body), true),
        None => (line, false),
    };
    let mut keys = decode_keys(body);
    if terminated {
        keys.push(Key::Enter);
    }

    let mut result = LineResult::Unterminated;
    let mut last_navigation = false;
    for key in keys {
        match key {
            Key::Char(c) => {
                let mut buf = state.session.state().input().to_string();
                buf.push(c);
                state.session.set_input(&buf);
                last_navigation = false;
            },
            Key::Backspace => {
                let mut buf = state.session.state().input().to_string();
                buf.pop();
                state.session.set_input(&buf);
                last_navigation = false;
            },
            Key::Enter => {
                if last_navigation {
                    result = LineResult::Pending;
                } else {
                    let buf = state.session.state().input().to_string();
                    state.session.submit(&buf);
                    // A blank submit leaves the buffer alone; start fresh anyway.
                    state.session.set_input("");
                    result = LineResult::Submitted;
                }
                last_navigation = false;
            },
            key => {
                let action = state.session.handle_key(key);
                last_navigation = action == KeyAction::Handled && key.is_navigation();
            },
        }
        render::render_new(state, out)?;
    }
    render::render_prompt(state, out)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvterm_terminal::RawCommand;
    use cvterm_types::config::TerminalConfig;

    fn ready_state() -> AppState {
        let mut state = AppState::new(TerminalConfig {
            welcome: String::new(),
            commands: vec![
                RawCommand::new("build", "how I build", "With Rust."),
                RawCommand::new("bio", "about me", "Hello.\nNice to meet you."),
            ],
            ..TerminalConfig::default()
        });
        state.load_commands();
        state
    }

    fn feed(state: &mut AppState, line: &str) -> (LineResult, String) {
        let mut buf = Vec::new();
        let result = handle_line(line, state, &mut buf).unwrap();
        (result, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn plain_line_submits() {
        let mut state = ready_state();
        let (result, out) = feed(&mut state, "bio\n");
        assert_eq!(result, LineResult::Submitted);
        assert_eq!(
            out,
            "user@cv:~$ bio\nHello.\nNice to meet you.\nuser@cv:~$ "
        );
        assert_eq!(state.session.state().history(), ["bio"]);
    }

    #[test]
    fn tab_completion_carries_buffer() {
        let mut state = ready_state();
        let (result, out) = feed(&mut state, "bu\t\n");
        assert_eq!(result, LineResult::Pending);
        assert_eq!(out, "user@cv:~$ build");
        assert!(state.session.state().history().is_empty());

        let (result, out) = feed(&mut state, "\n");
        assert_eq!(result, LineResult::Submitted);
        assert_eq!(out, "user@cv:~$ build\nWith Rust.\nuser@cv:~$ ");
    }

    #[test]
    fn ambiguous_tab_lists_candidates() {
        let mut state = ready_state();
        let (result, out) = feed(&mut state, "b\t\n");
        assert_eq!(result, LineResult::Pending);
        assert_eq!(out, "build    bio\nuser@cv:~$ b");
    }

    #[test]
    fn arrow_up_recalls_previous_line() {
        let mut state = ready_state();
        feed(&mut state, "bio\n");
        feed(&mut state, "build\n");
        let (result, out) = feed(&mut state, "\x1b[A\x1b[A\n");
        assert_eq!(result, LineResult::Pending);
        assert_eq!(out, "user@cv:~$ bio");
        let (_, out) = feed(&mut state, "\x1b[B\n");
        assert_eq!(out, "user@cv:~$ build");
    }

    #[test]
    fn typing_after_recall_edits_buffer() {
        let mut state = ready_state();
        feed(&mut state, "bio\n");
        feed(&mut state, "\x1b[A\n");
        feed(&mut state, "\x7f\x7fuild\n");
        assert_eq!(state.session.state().history(), ["bio", "build"]);
    }

    #[test]
    fn unhandled_key_after_tab_lets_enter_submit() {
        let mut state = ready_state();
        let (result, _) = feed(&mut state, "bu\t\x1b[C\n");
        assert_eq!(result, LineResult::Submitted);
        assert_eq!(state.session.state().history(), ["build"]);
    }

    #[test]
    fn crlf_line_ending_is_one_enter() {
        let mut state = ready_state();
        let (result, out) = feed(&mut state, "bu\t\r\n");
        assert_eq!(result, LineResult::Pending);
        assert_eq!(out, "user@cv:~$ build");
    }

    #[test]
    fn blank_line_submits_nothing() {
        let mut state = ready_state();
        let (result, out) = feed(&mut state, "   \n");
        assert_eq!(result, LineResult::Submitted);
        assert_eq!(out, "user@cv:~$ ");
        assert!(state.session.state().scrollback().is_empty());
        assert_eq!(state.session.state().input(), "");
    }

    #[test]
    fn line_without_newline_is_unterminated() {
        let mut state = ready_state();
        let (result, _) = feed(&mut state, "bi");
        assert_eq!(result, LineResult::Unterminated);
        assert_eq!(state.session.state().input(), "bi");
    }

    #[test]
    fn invalid_utf8_line_is_read_lossily() {
        let mut reader = io::Cursor::new(b"bi\xffo\nbio\n".to_vec());
        let mut buf = Vec::new();
        let mut state = ready_state();

        let line = read_line_lossy(&mut reader, &mut buf).unwrap().unwrap();
        assert_eq!(line, "bi\u{fffd}o\n");
        let (result, _) = feed(&mut state, &line);
        assert_eq!(result, LineResult::Submitted);

        let line = read_line_lossy(&mut reader, &mut buf).unwrap().unwrap();
        assert_eq!(line, "bio\n");
        assert!(read_line_lossy(&mut reader, &mut buf).unwrap().is_none());
        assert_eq!(state.session.state().history(), ["bi\u{fffd}o"]);
    }

    #[test]
    fn clear_clears_the_screen() {
        let mut state = ready_state();
        feed(&mut state, "help\n");
        let (_, out) = feed(&mut state, "clear\n");
        // The `clear` command entry is wiped before it is ever drawn.
        assert_eq!(out, "\x1b[2J\x1b[Huser@cv:~$ ");
        assert_eq!(state.rendered, 0);
    }
}
