//! Services module for tealoop
//!
//! The blocking work behind commands lives here: the HTTP status probe and
//! the directory listing. `ServiceManager` plugs them into the command
//! executor and turns every error into a failure outcome.

pub mod error;
pub mod listing;
pub mod probe;

pub use error::{ServiceError, ServiceResult};
pub use probe::ProbeService;

use crate::tea::command::{CommandHandler, ListingRequest, ProbeRequest};
use crate::tea::message::Outcome;

/// Service manager that performs commands against the real network and disk
#[derive(Debug, Clone)]
pub struct ServiceManager {
    probe: ProbeService,
}

impl ServiceManager {
    /// Create a new service manager with all services initialized
    pub fn new() -> ServiceResult<Self> {
        Ok(Self {
            probe: ProbeService::new()?,
        })
    }
}

#[async_trait::async_trait]
impl CommandHandler for ServiceManager {
    async fn probe(&self, request: ProbeRequest) -> Outcome {
        match self.probe.check(&request.url, request.timeout).await {
            Ok(code) => Outcome::StatusResult { code },
            Err(e) => {
                tracing::warn!("Probe failed: {}", e);
                Outcome::Failure { cause: e.to_string() }
            }
        }
    }

    async fn list_files(&self, request: ListingRequest) -> Outcome {
        match listing::list_files(request.root, request.extension).await {
            Ok(names) => Outcome::FileListResult { names },
            Err(e) => {
                tracing::warn!("Listing failed: {}", e);
                Outcome::Failure { cause: e.to_string() }
            }
        }
    }
}
