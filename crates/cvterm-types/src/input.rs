//! Front-end-agnostic key events.
//!
//! Every front end maps its native input to [`Key`]. The terminal core never
//! sees raw key codes or escape sequences.

use std::iter::Peekable;
use std::str::Chars;

use serde::{Deserialize, Serialize};

/// A single key press as seen by the line interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Completion request.
    Tab,
    /// Recall an older history entry.
    ArrowUp,
    /// Recall a newer history entry.
    ArrowDown,
    /// Delete the character left of the cursor.
    Backspace,
    /// Submit the current line.
    Enter,
    /// A printable character.
    Char(char),
    /// Anything else (function keys, unsupported escape sequences).
    Other,
}

impl Key {
    /// Whether the key moves through history or requests completion.
    pub fn is_navigation(self) -> bool {
        matches!(self, Key::Tab | Key::ArrowUp | Key::ArrowDown)
    }
}

/// Decode cooked-mode terminal input into key events.
///
/// Recognizes `\t`, `\r`/`\n`, DEL and BS, and the CSI / SS3 cursor
/// sequences (`ESC [ A`, `ESC O B`, with optional parameters such as
/// `ESC [ 1 ; 5 A`). Unrecognized escape sequences are consumed whole and
/// reported as a single [`Key::Other`].
pub fn decode_keys(input: &str) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        let key = match c {
            '\t' => Key::Tab,
            '\r' | '\n' => Key::Enter,
            '\x7f' | '\x08' => Key::Backspace,
            '\x1b' => decode_escape(&mut chars),
            c if c.is_control() => Key::Other,
            c => Key::Char(c),
        };
        keys.push(key);
    }
    keys
}

/// Decode the remainder of an escape sequence (the `ESC` is already consumed).
fn decode_escape(chars: &mut Peekable<Chars<'_>>) -> Key {
    match chars.peek() {
        Some('[') | Some('O') => {
            chars.next();
        },
        _ => return Key::Other,
    }
    // Skip numeric parameters and separators up to the final byte.
    while let Some(&p) = chars.peek() {
        if p.is_ascii_digit() || p == ';' {
            chars.next();
        } else {
            break;
        }
    }
    match chars.next() {
        Some('A') => Key::ArrowUp,
        Some('B') => Key::ArrowDown,
        _ => Key::Other,
    }
}
