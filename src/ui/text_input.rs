/// Single-line text input with a blinking cursor
///
/// The widget owns its buffer and cursor. Key handling returns a `Command`
/// so the blink timer runs through the normal command path instead of a
/// private thread.

use crate::tea::message::Key;
use crate::tea::Command;
use crate::theme::StyleSet;
use ratatui::text::{Line, Span};
use tokio::time::Duration;

/// Delay between cursor blinks
pub const BLINK_INTERVAL: Duration = Duration::from_millis(530);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: Vec<char>,
    cursor: usize,
    focused: bool,
    cursor_visible: bool,
    blink_generation: u64,
    placeholder: String,
}

impl TextInput {
    /// Create an unfocused input holding `value`, cursor at the end
    pub fn new(value: &str) -> Self {
        let value: Vec<char> = value.chars().collect();
        let cursor = value.len();
        Self {
            value,
            cursor,
            focused: false,
            cursor_visible: true,
            blink_generation: 0,
            placeholder: String::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Start out focused; pair with [`TextInput::blink_command`] to start blinking
    pub fn focused(mut self) -> Self {
        self.focused = true;
        self
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn blink_generation(&self) -> u64 {
        self.blink_generation
    }

    /// Edit the buffer for a key. Keys the input does not understand leave
    /// it untouched. Unfocused inputs ignore everything.
    pub fn handle_key(&mut self, key: Key) -> Command {
        if !self.focused {
            return Command::none();
        }

        match key {
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.value.len()),
            Key::Home | Key::Ctrl('a') => self.cursor = 0,
            Key::End | Key::Ctrl('e') => self.cursor = self.value.len(),
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                }
            }
            Key::Delete | Key::Ctrl('d') => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            Key::Ctrl('u') => {
                self.value.drain(..self.cursor);
                self.cursor = 0;
            }
            Key::Ctrl('k') => self.value.truncate(self.cursor),
            Key::Char(c) if !c.is_control() => {
                self.value.insert(self.cursor, c);
                self.cursor += 1;
            }
            _ => return Command::none(),
        }

        self.restart_blink()
    }

    /// React to a blink timer. Timers from an older generation are stale and
    /// ignored, so at most one blink chain is ever alive.
    pub fn handle_blink(&mut self, generation: u64) -> Command {
        if !self.focused || generation != self.blink_generation {
            return Command::none();
        }
        self.cursor_visible = !self.cursor_visible;
        Command::blink(BLINK_INTERVAL, self.blink_generation)
    }

    /// Timer for the current blink chain, nothing when unfocused
    pub fn blink_command(&self) -> Command {
        if self.focused {
            Command::blink(BLINK_INTERVAL, self.blink_generation)
        } else {
            Command::none()
        }
    }

    fn restart_blink(&mut self) -> Command {
        self.cursor_visible = true;
        self.blink_generation += 1;
        Command::blink(BLINK_INTERVAL, self.blink_generation)
    }

    /// Render as a single line with the cursor cell highlighted
    pub fn view(&self, styles: &StyleSet) -> Line<'static> {
        let show_cursor = self.focused && self.cursor_visible;

        if self.value.is_empty() {
            let mut placeholder = self.placeholder.chars();
            let first = placeholder.next().map(String::from).unwrap_or_else(|| " ".to_string());
            let rest: String = placeholder.collect();
            let first_style = if show_cursor { styles.cursor } else { styles.placeholder };
            return Line::from(vec![
                Span::styled(first, first_style),
                Span::styled(rest, styles.placeholder),
            ]);
        }

        let before: String = self.value[..self.cursor].iter().collect();
        let at: String = self
            .value
            .get(self.cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = self.value.get(self.cursor + 1..).unwrap_or_default().iter().collect();

        let cursor_style = if show_cursor { styles.cursor } else { styles.input };
        Line::from(vec![
            Span::styled(before, styles.input),
            Span::styled(at, cursor_style),
            Span::styled(after, styles.input),
        ])
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new("")
    }
}
