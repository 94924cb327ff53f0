/// HTTP status probe
///
/// Checks a URL once on startup and shows the response code. By default the
/// first completion, success or failure, ends the program; with
/// `keep_running` the URL can be edited and checked again.

pub mod update;
pub mod view;

pub use update::update;
pub use view::{summary, view};

use crate::tea::{Command, CompletionPolicy, Message, Model, UpdateResult};
use crate::theme::Theme;
use crate::ui::TextInput;
use ratatui::text::Text;
use tokio::time::Duration;

pub const DEFAULT_URL: &str = "https://charm.sh/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Probe settings taken from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub url: String,
    pub timeout: Duration,
    pub keep_running: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            keep_running: false,
        }
    }
}

/// Probe state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeState {
    /// Editable URL
    pub input: TextInput,

    /// URL of the in-flight or last finished check
    pub checked_url: Option<String>,

    /// Status code of the last successful check
    pub status: Option<u16>,

    pub error: Option<String>,
    pub loading: bool,
    pub timeout: Duration,
    pub policy: CompletionPolicy,
    pub theme: Theme,
}

impl ProbeState {
    pub fn new(config: ProbeConfig, theme: Theme) -> Self {
        let policy = if config.keep_running {
            CompletionPolicy::keep_running()
        } else {
            CompletionPolicy::one_shot()
        };
        let loading = !config.url.is_empty();
        let checked_url = loading.then(|| config.url.clone());

        Self {
            input: TextInput::new(&config.url)
                .with_placeholder("https://example.com/")
                .focused(),
            checked_url,
            status: None,
            error: None,
            loading,
            timeout: config.timeout,
            policy,
            theme,
        }
    }

    /// Probe of the URL currently in the input
    pub fn probe_command(&self) -> Command {
        Command::probe(self.input.value(), self.timeout)
    }
}

impl Default for ProbeState {
    fn default() -> Self {
        Self::new(ProbeConfig::default(), Theme::default())
    }
}

impl Model for ProbeState {
    fn init(&self) -> Command {
        let probe = if self.loading {
            self.probe_command()
        } else {
            Command::none()
        };
        Command::batch([probe, self.input.blink_command()])
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
