pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::processing::StringProcessor;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<StringProcessor>,
    pub service_name: String,
    pub request_timeout: Duration,
    pub metrics_enabled: bool,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(processor: Arc<StringProcessor>) -> Self {
        Self {
            processor,
            service_name: "string-analyzer".to_string(),
            request_timeout: Duration::from_secs(30),
            metrics_enabled: true,
            started_at: Instant::now(),
        }
    }

    /// Set the service name reported by the health endpoint
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Mount `/metrics` only when enabled
    pub fn with_metrics_enabled(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
