/// Command system for TEA pattern
///
/// Commands describe side effects requested by the update function. The
/// executor launches each one on its own task; whatever the command produces
/// comes back to the loop as a single `Message::CommandCompleted`.

use crate::tea::message::{Message, Outcome};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Duration;
use uuid::Uuid;

/// Command that can be executed to perform side effects
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    /// No operation - used when no side effects are needed
    #[default]
    None,

    /// Request the HTTP status of a URL
    Probe(ProbeRequest),

    /// Walk a directory tree collecting matching file names
    ListFiles(ListingRequest),

    /// Fire a blink message after a delay
    Blink(BlinkRequest),

    /// Batch multiple commands
    Batch(Vec<Command>),
}

/// Parameters of an HTTP status probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: String,
    pub timeout: Duration,
}

/// Parameters of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub root: PathBuf,
    /// File name suffix without the leading dot, matched case-insensitively
    pub extension: String,
}

/// Cursor blink timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkRequest {
    pub delay: Duration,
    pub generation: u64,
}

impl Command {
    /// Create a no-op command
    pub fn none() -> Self {
        Command::None
    }

    /// Create a probe command
    pub fn probe(url: impl Into<String>, timeout: Duration) -> Self {
        Command::Probe(ProbeRequest {
            url: url.into(),
            timeout,
        })
    }

    /// Create a listing command
    pub fn list_files(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Command::ListFiles(ListingRequest {
            root: root.into(),
            extension: extension.into(),
        })
    }

    /// Create a blink timer command
    pub fn blink(delay: Duration, generation: u64) -> Self {
        Command::Blink(BlinkRequest { delay, generation })
    }

    /// Create a batch of commands, flattening away no-ops
    pub fn batch(commands: impl IntoIterator<Item = Command>) -> Self {
        let mut commands: Vec<Command> = commands
            .into_iter()
            .filter(|command| !command.is_none())
            .collect();
        match commands.len() {
            0 => Command::None,
            1 => commands.remove(0),
            _ => Command::Batch(commands),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::None => "none",
            Command::Probe(_) => "probe",
            Command::ListFiles(_) => "list-files",
            Command::Blink(_) => "blink",
            Command::Batch(_) => "batch",
        }
    }
}

/// Performs the blocking work behind probe and listing commands
///
/// Implementations must map every error into `Outcome::Failure`; nothing is
/// allowed to escape into the loop.
#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn probe(&self, request: ProbeRequest) -> Outcome;

    async fn list_files(&self, request: ListingRequest) -> Outcome;
}

/// Command executor that runs commands concurrently with the update loop
#[derive(Clone)]
pub struct CommandExecutor {
    message_sender: mpsc::UnboundedSender<Message>,
    handler: Arc<dyn CommandHandler>,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(
        message_sender: mpsc::UnboundedSender<Message>,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            message_sender,
            handler,
        }
    }

    /// Launch a command without waiting for it
    pub fn dispatch(&self, command: Command) {
        match command {
            Command::None => {}
            Command::Batch(commands) => {
                for command in commands {
                    self.dispatch(command);
                }
            }
            command => self.spawn(command),
        }
    }

    fn spawn(&self, command: Command) {
        let id = Uuid::new_v4();
        let name = command.name();
        let sender = self.message_sender.clone();
        let handler = Arc::clone(&self.handler);

        tracing::debug!("Dispatching command {} ({})", id, name);

        tokio::spawn(async move {
            let outcome = match command {
                Command::Probe(request) => handler.probe(request).await,
                Command::ListFiles(request) => handler.list_files(request).await,
                Command::Blink(request) => {
                    tokio::time::sleep(request.delay).await;
                    Outcome::Blink {
                        generation: request.generation,
                    }
                }
                Command::None | Command::Batch(_) => return,
            };

            if let Outcome::Failure { cause } = &outcome {
                tracing::debug!("Command {} ({}) failed: {}", id, name, cause);
            } else {
                tracing::debug!("Command {} ({}) completed", id, name);
            }

            // The loop may already be gone; late results are dropped.
            if sender.send(Message::CommandCompleted(outcome)).is_err() {
                tracing::warn!("Dropping result of command {} ({}): loop has exited", id, name);
            }
        });
    }
}
