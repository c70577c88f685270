//! Server state and response bodies.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::cache::ResponseCache;
use crate::probe::DomainProber;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub prober: Arc<DomainProber>,
    pub cache: ResponseCache,
    /// Upper bound for one probe, cache wait included
    pub probe_timeout: Duration,
}

/// JSON body for failed lookups
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
