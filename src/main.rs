use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tealoop::app::App;
use tealoop::cli::Cli;
use tealoop::logging;
use tealoop::tea::ExitReason;

/// How long in-flight commands get after the loop exits before they are abandoned
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_settings()) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {}", e);
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(&cli));

    // Late command results have nowhere to go; drop them with their tasks.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    match result {
        Ok(reason) => {
            tracing::info!("Exited: {:?}", reason);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Fatal: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<ExitReason> {
    let app = App::new(cli.program())?;
    app.run().await
}
