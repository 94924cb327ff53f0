/// PDF library browser
///
/// Scans a directory tree for documents on startup and lets the user move a
/// cursor over the results. Completions never end the program; only the quit
/// keys do.

pub mod update;
pub mod view;

pub use update::update;
pub use view::{summary, view};

use crate::tea::{Command, CompletionPolicy, Message, Model, UpdateResult};
use crate::theme::Theme;
use ratatui::text::Text;
use std::path::PathBuf;

/// Where to scan and what to look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub root: PathBuf,
    /// Suffix without the leading dot
    pub extension: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extension: "pdf".to_string(),
        }
    }
}

/// Library browser state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryState {
    /// Matching file names from the last successful scan
    pub files: Vec<String>,

    /// Row the cursor is on, always a valid index or 0
    pub cursor: usize,

    /// Row confirmed with enter
    pub selected: Option<usize>,

    /// Last error, shown instead of the list
    pub error: Option<String>,

    /// A scan is in flight
    pub loading: bool,

    /// Terminal rows available, once known
    pub viewport_height: Option<u16>,

    pub config: LibraryConfig,
    pub policy: CompletionPolicy,
    pub theme: Theme,
}

impl LibraryState {
    /// Fresh state waiting for the initial scan
    pub fn new(config: LibraryConfig, theme: Theme) -> Self {
        Self {
            files: Vec::new(),
            cursor: 0,
            selected: None,
            error: None,
            loading: true,
            viewport_height: None,
            config,
            policy: CompletionPolicy::keep_running(),
            theme,
        }
    }

    /// Command scanning the configured root
    pub fn scan_command(&self) -> Command {
        Command::list_files(self.config.root.clone(), self.config.extension.clone())
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.files.get(index))
            .map(String::as_str)
    }

    /// Label for the kind of file being listed, e.g. `PDF`
    pub fn kind_label(&self) -> String {
        self.config.extension.trim_start_matches('.').to_uppercase()
    }
}

impl Default for LibraryState {
    fn default() -> Self {
        Self::new(LibraryConfig::default(), Theme::default())
    }
}

impl Model for LibraryState {
    fn init(&self) -> Command {
        self.scan_command()
    }

    fn update(self, message: Message) -> UpdateResult<Self> {
        update(self, message)
    }

    fn view(&self) -> Text<'static> {
        view(self)
    }

    fn summary(&self) -> Text<'static> {
        summary(self)
    }
}
