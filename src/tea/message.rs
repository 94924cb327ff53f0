/// Central message type following the TEA pattern
///
/// Every keystroke, command outcome and internal error reaches the update
/// function as one of these values. Messages are immutable once built and
/// never carry any part of the model.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use std::str::FromStr;

/// Main application message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A single user keystroke
    KeyInput(Key),

    /// A dispatched command finished
    CommandCompleted(Outcome),

    /// Terminal was resized, the model is re-rendered
    Resize { width: u16, height: u16 },

    /// Internal error raised outside of any command (e.g. input reader)
    Error { cause: String },

    /// Request loop termination
    Quit,
}

/// Payload of a completed command, one variant per command kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Probe command finished with an HTTP status code
    StatusResult { code: u16 },

    /// Listing command finished with matching base names, in walk order
    FileListResult { names: Vec<String> },

    /// Blink timer fired for the given cursor generation
    Blink { generation: u64 },

    /// Any command failed
    Failure { cause: String },
}

/// Keys the programs react to, decoupled from the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Esc,
    Tab,
    Backspace,
    Delete,
    Char(char),
    Ctrl(char),
}

impl Key {
    /// Keys that end the loop regardless of program
    pub fn is_interrupt(self) -> bool {
        matches!(self, Key::Esc | Key::Ctrl('c'))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Home => f.write_str("home"),
            Key::End => f.write_str("end"),
            Key::Enter => f.write_str("enter"),
            Key::Esc => f.write_str("esc"),
            Key::Tab => f.write_str("tab"),
            Key::Backspace => f.write_str("backspace"),
            Key::Delete => f.write_str("delete"),
            Key::Char(' ') => f.write_str("space"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "ctrl+{}", c),
        }
    }
}

/// Error returned when a key name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name: {0}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "enter" => Key::Enter,
            "esc" => Key::Esc,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "delete" => Key::Delete,
            "space" => Key::Char(' '),
            other => {
                let mut chars = other.chars();
                match (other.strip_prefix("ctrl+"), chars.next(), chars.next()) {
                    (Some(rest), _, _) => {
                        let mut rest_chars = rest.chars();
                        match (rest_chars.next(), rest_chars.next()) {
                            (Some(c), None) => Key::Ctrl(c.to_ascii_lowercase()),
                            _ => return Err(UnknownKey(s.to_string())),
                        }
                    }
                    (None, Some(c), None) => Key::Char(c),
                    _ => return Err(UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl Key {
    /// Convert a crossterm key event, returning `None` for keys we ignore
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        let key = match event.code {
            KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Ctrl(c.to_ascii_lowercase())
            }
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            _ => return None,
        };
        Some(key)
    }
}

impl From<Outcome> for Message {
    fn from(outcome: Outcome) -> Self {
        Message::CommandCompleted(outcome)
    }
}

impl From<Key> for Message {
    fn from(key: Key) -> Self {
        Message::KeyInput(key)
    }
}
