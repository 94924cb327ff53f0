/// Update loop driving a TEA model
///
/// The runtime owns the model and the message queue. Each cycle it takes one
/// message, runs the model's update synchronously, launches the returned
/// command on the executor and renders the new model. Nothing else ever
/// touches the model, so no locking is involved.

use crate::tea::command::{Command, CommandExecutor, CommandHandler};
use crate::tea::message::Message;
use crate::tea::{Model, UpdateResult};
use ratatui::text::Text;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Sink for rendered frames (the terminal, or a recorder in tests)
pub trait Frontend {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(&mut self, frame: &Text<'_>) -> Result<(), Self::Error>;
}

/// Errors that abort the update loop
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("failed to render frame: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("message queue closed unexpectedly")]
    QueueClosed,
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// A `Quit` message was processed
    Quit,

    /// The model returned `Flow::Stop`
    Stopped,
}

/// Final state of a finished run
#[derive(Debug)]
pub struct RunOutcome<M> {
    pub model: M,
    pub reason: ExitReason,
    pub processed: usize,
}

/// Cloneable sender for feeding messages into a running loop
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    sender: mpsc::UnboundedSender<Message>,
}

impl RuntimeHandle {
    /// Enqueue a message, returns false when the loop has exited
    pub fn send(&self, message: Message) -> bool {
        self.sender.send(message).is_ok()
    }

    /// Ask the loop to terminate
    pub fn quit(&self) -> bool {
        self.send(Message::Quit)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Message queue plus command executor
pub struct Runtime {
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    handler: Arc<dyn CommandHandler>,
}

impl Runtime {
    pub fn new(handler: Arc<dyn CommandHandler>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            handler,
        }
    }

    /// Handle for input sources; must be taken before `run`
    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            sender: self.sender.clone(),
        }
    }

    /// Run the loop until the model stops or a `Quit` arrives
    pub async fn run<M, F>(
        self,
        model: M,
        init: Command,
        frontend: &mut F,
    ) -> Result<RunOutcome<M>, RuntimeError>
    where
        M: Model,
        F: Frontend,
    {
        let Runtime {
            sender,
            mut receiver,
            handler,
        } = self;
        let executor = CommandExecutor::new(sender, handler);

        tracing::info!("Starting update loop");

        let mut model = model;
        let mut processed = 0usize;

        executor.dispatch(init);
        render(frontend, &model)?;

        let reason = loop {
            // The executor holds a sender, so the queue only closes on a bug.
            let Some(message) = receiver.recv().await else {
                tracing::error!("Message queue closed while the loop was running");
                return Err(RuntimeError::QueueClosed);
            };

            let quit = matches!(message, Message::Quit);
            let UpdateResult {
                model: next,
                command,
                flow,
            } = model.update(message);
            model = next;
            processed += 1;

            if quit || flow.is_stop() {
                if !command.is_none() {
                    tracing::debug!("Discarding {} command returned with stop", command.name());
                }
                render(frontend, &model)?;
                break if quit { ExitReason::Quit } else { ExitReason::Stopped };
            }

            executor.dispatch(command);
            render(frontend, &model)?;
        };

        tracing::info!("Update loop finished after {} messages: {:?}", processed, reason);

        Ok(RunOutcome {
            model,
            reason,
            processed,
        })
    }
}

fn render<M: Model, F: Frontend>(frontend: &mut F, model: &M) -> Result<(), RuntimeError> {
    frontend
        .render(&model.view())
        .map_err(|e| RuntimeError::Render(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tea::command::{ListingRequest, ProbeRequest};
    use crate::tea::message::{Key, Outcome};
    use crate::tea::{plain_text, Flow};
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Duration;

    /// Counts messages and records the order they arrive in
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Recorder {
        seen: Vec<Message>,
        stop_after: Option<usize>,
        reply_with: Option<Command>,
    }

    impl Model for Recorder {
        fn update(mut self, message: Message) -> UpdateResult<Self> {
            if matches!(message, Message::Quit) {
                self.seen.push(message);
                return UpdateResult::stop(self);
            }
            self.seen.push(message);
            let command = self.reply_with.take().unwrap_or_default();
            let flow = match self.stop_after {
                Some(n) if self.seen.len() >= n => Flow::Stop,
                _ => Flow::Continue,
            };
            UpdateResult::new(self, command, flow)
        }

        fn view(&self) -> Text<'static> {
            Text::from(format!("seen {}", self.seen.len()))
        }
    }

    #[derive(Default)]
    struct Frames(Vec<String>);

    impl Frontend for Frames {
        type Error = Infallible;

        fn render(&mut self, frame: &Text<'_>) -> Result<(), Self::Error> {
            self.0.push(plain_text(frame));
            Ok(())
        }
    }

    /// Answers instantly and counts how many commands it ran
    #[derive(Default)]
    struct Canned {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl CommandHandler for Canned {
        async fn probe(&self, _request: ProbeRequest) -> Outcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Outcome::StatusResult { code: 200 }
        }

        async fn list_files(&self, _request: ListingRequest) -> Outcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Outcome::FileListResult {
                names: vec!["a.pdf".to_string()],
            }
        }
    }

    #[tokio::test]
    async fn test_messages_processed_in_arrival_order() {
        let runtime = Runtime::new(Arc::new(Canned::default()));
        let handle = runtime.handle();
        for c in ['a', 'b', 'c'] {
            assert!(handle.send(Message::KeyInput(Key::Char(c))));
        }
        assert!(handle.quit());
        drop(handle);

        let mut frames = Frames::default();
        let outcome = runtime
            .run(Recorder::default(), Command::none(), &mut frames)
            .await
            .unwrap();

        assert_eq!(outcome.reason, ExitReason::Quit);
        assert_eq!(outcome.processed, 4);
        assert_eq!(
            outcome.model.seen[..3],
            [
                Message::KeyInput(Key::Char('a')),
                Message::KeyInput(Key::Char('b')),
                Message::KeyInput(Key::Char('c')),
            ]
        );
        // initial frame plus one per message
        assert_eq!(frames.0.len(), 5);
        assert_eq!(frames.0.last().map(String::as_str), Some("seen 4"));
    }

    #[tokio::test]
    async fn test_init_command_result_is_delivered() {
        let runtime = Runtime::new(Arc::new(Canned::default()));
        let model = Recorder {
            stop_after: Some(1),
            ..Recorder::default()
        };

        let mut frames = Frames::default();
        let outcome = runtime
            .run(model, Command::list_files(".", "pdf"), &mut frames)
            .await
            .unwrap();

        assert_eq!(outcome.reason, ExitReason::Stopped);
        assert_eq!(
            outcome.model.seen,
            vec![Message::CommandCompleted(Outcome::FileListResult {
                names: vec!["a.pdf".to_string()]
            })]
        );
    }

    #[tokio::test]
    async fn test_command_returned_with_stop_is_not_dispatched() {
        let handler = Arc::new(Canned::default());
        let runtime = Runtime::new(handler.clone());
        let handle = runtime.handle();
        let model = Recorder {
            stop_after: Some(1),
            reply_with: Some(Command::probe("http://localhost/", Duration::from_secs(1))),
            ..Recorder::default()
        };
        handle.send(Message::KeyInput(Key::Enter));

        let mut frames = Frames::default();
        let outcome = runtime.run(model, Command::none(), &mut frames).await.unwrap();
        assert_eq!(outcome.reason, ExitReason::Stopped);
        assert_eq!(outcome.processed, 1);

        // a dispatched probe would have answered by now
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
        assert!(handle.is_closed());
        assert!(!handle.send(Message::KeyInput(Key::Enter)));
    }
}
