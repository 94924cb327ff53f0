use crate::library::LibraryConfig;
use crate::logging::LogSettings;
use crate::probe::{ProbeConfig, DEFAULT_URL};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::time::Duration;

/// tealoop - message-driven terminal tools
#[derive(Parser, Debug)]
#[command(name = "tealoop")]
#[command(about = "Check a URL's HTTP status or browse the PDF files under a directory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Write logs to this file (the screen is owned by the interface)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the HTTP status of a URL
    Probe(ProbeArgs),

    /// Browse PDF files found under a directory (the default)
    Library(LibraryArgs),
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// URL to request
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Keep the interface open after the check so the URL can be edited and checked again
    #[arg(long)]
    pub keep_running: bool,
}

#[derive(Args, Debug)]
pub struct LibraryArgs {
    /// Directory to scan recursively
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// File extension to look for, matched case-insensitively
    #[arg(long, default_value = "pdf")]
    pub extension: String,
}

/// Which program to run, with its settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramConfig {
    Probe(ProbeConfig),
    Library(LibraryConfig),
}

impl Cli {
    pub fn program(&self) -> ProgramConfig {
        match &self.command {
            Some(Commands::Probe(args)) => ProgramConfig::Probe(ProbeConfig {
                url: args.url.clone(),
                timeout: Duration::from_secs(args.timeout),
                keep_running: args.keep_running,
            }),
            Some(Commands::Library(args)) => ProgramConfig::Library(LibraryConfig {
                root: args.root.clone(),
                extension: args.extension.trim_start_matches('.').to_string(),
            }),
            None => ProgramConfig::Library(LibraryConfig::default()),
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            debug: self.debug,
            file: self.log_file.clone(),
        }
    }
}
