//! Centralized configuration for the registration front-end.
//!
//! Constants follow the same grouping as the rest of the workspace; the
//! runtime-tunable knobs live on [`ClientConfig`].

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Satellite Registration";
    pub const USER_AGENT: &'static str = "satreg/0.1";
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_DETAIL_CONCURRENCY: usize = 4;
    pub const DEFAULT_ORGANIZATION_ID: u64 = 1;
}

/// Fallback values substituted when the upstream omits a field.
pub struct DefaultsConfig;

impl DefaultsConfig {
    pub const UNNAMED_KEY: &'static str = "Unnamed";
    pub const UNNAMED_CAPSULE: &'static str = "Unnamed Capsule";
    pub const UNKNOWN_LOCATION: &'static str = "Unknown";
    pub const NO_COMMAND: &'static str = "No command returned.";
}

/// Settings for the upstream client and orchestrator.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Skip TLS certificate verification toward the upstream API.
    ///
    /// Off unless explicitly enabled (`--insecure` on the web binary).
    pub accept_invalid_certs: bool,
    /// Total timeout applied to every upstream request.
    pub request_timeout: Duration,
    /// Maximum number of capsule detail lookups in flight at once.
    pub detail_concurrency: usize,
    /// Organization whose activation keys are listed.
    pub organization_id: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: false,
            request_timeout: NetworkConfig::REQUEST_TIMEOUT,
            detail_concurrency: NetworkConfig::DEFAULT_DETAIL_CONCURRENCY,
            organization_id: NetworkConfig::DEFAULT_ORGANIZATION_ID,
        }
    }
}

impl ClientConfig {
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the detail lookup limit. Values below 1 are clamped to 1.
    pub fn with_detail_concurrency(mut self, limit: usize) -> Self {
        self.detail_concurrency = limit.max(1);
        self
    }

    pub fn with_organization_id(mut self, organization_id: u64) -> Self {
        self.organization_id = organization_id;
        self
    }
}
