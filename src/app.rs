use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cli::ProgramConfig;
use crate::library::LibraryState;
use crate::probe::ProbeState;
use crate::services::ServiceManager;
use crate::tea::{plain_text, CommandHandler, ExitReason, Model, Runtime};
use crate::terminal::{spawn_input_reader, TerminalFrontend};
use crate::theme::Theme;

/// Wires a program to the terminal, the input reader and the real services
pub struct App {
    program: ProgramConfig,
    theme: Theme,
    handler: Arc<dyn CommandHandler>,
}

impl App {
    pub fn new(program: ProgramConfig) -> Result<Self> {
        let services = ServiceManager::new().context("Failed to initialize services")?;
        Ok(Self {
            program,
            theme: Theme::from_env(),
            handler: Arc::new(services),
        })
    }

    pub async fn run(self) -> Result<ExitReason> {
        match self.program {
            ProgramConfig::Probe(config) => {
                let model = ProbeState::new(config, self.theme);
                run_model(model, self.handler).await
            }
            ProgramConfig::Library(config) => {
                let model = LibraryState::new(config, self.theme);
                run_model(model, self.handler).await
            }
        }
    }
}

async fn run_model<M: Model>(model: M, handler: Arc<dyn CommandHandler>) -> Result<ExitReason> {
    let runtime = Runtime::new(handler);
    let mut frontend = TerminalFrontend::enter()?;
    spawn_input_reader(runtime.handle()).context("Failed to start input reader")?;

    let init = model.init();
    let result = runtime.run(model, init, &mut frontend).await;
    frontend.restore()?;
    let outcome = result?;

    // Leave the result on the normal screen, like an inline program would.
    println!("{}", plain_text(&outcome.model.summary()));

    Ok(outcome.reason)
}
