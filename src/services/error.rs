//! Error types for the probe and listing services

use thiserror::Error;
use tokio::time::Duration;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures of the blocking work behind commands
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("error walking directory '{root}': {source}")]
    Traversal {
        root: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("listing worker stopped: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ServiceError {
    /// Classify a reqwest error for `url`
    pub fn from_request(url: &str, timeout: Duration, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ServiceError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            ServiceError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}
