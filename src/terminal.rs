/// Terminal frontend and keyboard reader
///
/// Setup failures here are the only fatal errors of a run; once the loop is
/// going, input problems are reported to it as messages.

use crate::tea::{Frontend, Key, Message, RuntimeHandle};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, text::Text, widgets::Paragraph, Terminal};
use std::io::{self, Stdout};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

/// How often the input reader checks whether the loop is still alive
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("tealoop requires a proper terminal (TTY) to run")]
    NotATty,

    #[error("failed to enable raw mode: {0}. Make sure you're running in a proper terminal.")]
    RawMode(#[source] io::Error),

    #[error("failed to set up terminal: {0}")]
    Setup(#[source] io::Error),

    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),

    #[error("failed to draw frame: {0}")]
    Draw(#[source] io::Error),
}

/// Full-screen ratatui frontend; restores the terminal on drop
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalFrontend {
    /// Switch the terminal to raw mode and the alternate screen
    pub fn enter() -> Result<Self, TerminalError> {
        if !io::stdout().is_tty() {
            return Err(TerminalError::NotATty);
        }

        enable_raw_mode().map_err(TerminalError::RawMode)?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(TerminalError::Setup(e));
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => {
                tracing::debug!("Terminal ready");
                Ok(Self {
                    terminal,
                    restored: false,
                })
            }
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(TerminalError::Setup(e))
            }
        }
    }

    /// Leave raw mode and the alternate screen. Safe to call twice.
    pub fn restore(&mut self) -> Result<(), TerminalError> {
        let terminal = &mut self.terminal;
        restore_once(&mut self.restored, || {
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()
        })
    }
}

/// Run `steps` unless they already succeeded once. A failed attempt leaves
/// the flag clear so the next call (or `Drop`) tries again.
fn restore_once<F>(restored: &mut bool, steps: F) -> Result<(), TerminalError>
where
    F: FnOnce() -> io::Result<()>,
{
    if *restored {
        return Ok(());
    }
    steps().map_err(TerminalError::Restore)?;
    *restored = true;
    Ok(())
}

impl Frontend for TerminalFrontend {
    type Error = TerminalError;

    fn render(&mut self, frame: &Text<'_>) -> Result<(), Self::Error> {
        self.terminal
            .draw(|f| f.render_widget(Paragraph::new(frame.clone()), f.size()))
            .map(|_| ())
            .map_err(TerminalError::Draw)
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!("{}", e);
        }
    }
}

/// Read keyboard and resize events on a dedicated thread and feed them to
/// the loop. The thread ends once the loop has exited.
pub fn spawn_input_reader(handle: RuntimeHandle) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tealoop-input".to_string())
        .spawn(move || read_input(handle))
}

fn read_input(handle: RuntimeHandle) {
    if let Ok((width, height)) = crossterm::terminal::size() {
        handle.send(Message::Resize { width, height });
    }

    while !handle.is_closed() {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                report_input_failure(&handle, e);
                break;
            }
        }

        let message = match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                Key::from_event(key).map(Message::KeyInput)
            }
            Ok(Event::Resize(width, height)) => Some(Message::Resize { width, height }),
            Ok(_) => None,
            Err(e) => {
                report_input_failure(&handle, e);
                break;
            }
        };

        if let Some(message) = message {
            if !handle.send(message) {
                break;
            }
        }
    }

    tracing::debug!("Input reader stopped");
}

/// Without input nobody can quit, so surface the error and end the loop
fn report_input_failure(handle: &RuntimeHandle, error: io::Error) {
    tracing::error!("Failed to read terminal input: {}", error);
    handle.send(Message::Error {
        cause: format!("failed to read terminal input: {}", error),
    });
    handle.quit();
}
