use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

/// Where and how verbosely to log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub debug: bool,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    /// Log destination: the explicit file, else a cache file in debug mode,
    /// else nothing. Logs never go to the terminal the interface draws on.
    pub fn path(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            if self.debug {
                dirs::cache_dir().map(|dir| dir.join("tealoop").join("debug.log"))
            } else {
                None
            }
        })
    }

    pub fn level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

/// Install the global tracing subscriber, returning the log file in use
pub fn init(settings: &LogSettings) -> Result<Option<PathBuf>> {
    let Some(path) = settings.path() else {
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(settings.level())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(Some(path))
}
