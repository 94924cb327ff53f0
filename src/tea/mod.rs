/// The Elm Architecture (TEA) pattern implementation for tealoop
///
/// This module provides a structured approach to state management following
/// the Model-Update-View pattern from Elm, adapted for Ratatui terminal interfaces.

pub mod command;
pub mod message;
pub mod runtime;

pub use command::{Command, CommandExecutor, CommandHandler};
pub use message::{Key, Message, Outcome};
pub use runtime::{ExitReason, Frontend, RunOutcome, Runtime, RuntimeError, RuntimeHandle};

use ratatui::text::Text;

/// Core TEA trait implemented by every program's state
///
/// `update` consumes the model and hands back the next one, so the loop is
/// the only owner of state at any time.
pub trait Model: Sized {
    /// Command to launch before the first message arrives
    fn init(&self) -> Command {
        Command::none()
    }

    /// Compute the next model for a message
    fn update(self, message: Message) -> UpdateResult<Self>;

    /// Render the model; must not fail for any reachable state
    fn view(&self) -> Text<'static>;

    /// Frame left on the normal screen after the loop exits, without key hints
    fn summary(&self) -> Text<'static> {
        self.view()
    }
}

/// Whether the loop keeps running after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Stop,
}

impl Flow {
    pub fn is_stop(self) -> bool {
        self == Flow::Stop
    }
}

/// Result of processing a TEA update cycle
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult<M> {
    pub model: M,
    pub command: Command,
    pub flow: Flow,
}

impl<M> UpdateResult<M> {
    pub fn new(model: M, command: Command, flow: Flow) -> Self {
        Self {
            model,
            command,
            flow,
        }
    }

    pub fn just_model(model: M) -> Self {
        Self::new(model, Command::none(), Flow::Continue)
    }

    pub fn with_command(model: M, command: Command) -> Self {
        Self::new(model, command, Flow::Continue)
    }

    /// Stop the loop; no command may accompany a stop
    pub fn stop(model: M) -> Self {
        Self::new(model, Command::none(), Flow::Stop)
    }
}

/// Per-program decision on whether a command completion ends the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionPolicy {
    pub stop_on_success: bool,
    pub stop_on_failure: bool,
}

impl CompletionPolicy {
    /// One-shot programs: any completion ends the run
    pub const fn one_shot() -> Self {
        Self {
            stop_on_success: true,
            stop_on_failure: true,
        }
    }

    /// Interactive programs: completions never end the run
    pub const fn keep_running() -> Self {
        Self {
            stop_on_success: false,
            stop_on_failure: false,
        }
    }

    pub fn flow(self, succeeded: bool) -> Flow {
        let stop = if succeeded {
            self.stop_on_success
        } else {
            self.stop_on_failure
        };
        if stop {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }
}

/// Flatten a styled frame into plain lines
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_policy_flow() {
        assert_eq!(CompletionPolicy::one_shot().flow(true), Flow::Stop);
        assert_eq!(CompletionPolicy::one_shot().flow(false), Flow::Stop);
        assert_eq!(CompletionPolicy::keep_running().flow(true), Flow::Continue);

        let mixed = CompletionPolicy {
            stop_on_success: true,
            stop_on_failure: false,
        };
        assert_eq!(mixed.flow(true), Flow::Stop);
        assert_eq!(mixed.flow(false), Flow::Continue);
    }

    #[test]
    fn test_stop_carries_no_command() {
        let result = UpdateResult::stop(1u8);
        assert!(result.flow.is_stop());
        assert!(result.command.is_none());
    }
}
