//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use point_ledger::settings::{ServerSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store_latency_ms: Option<u64>,
}

impl ServerConfig {
    /// Construct a configuration binding to `bind_addr` with no store latency.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            store_latency_ms: None,
        }
    }

    /// Build a configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the bind address cannot be parsed.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?).with_store_latency(settings.store_latency_ms()))
    }

    /// Inject up to `max_ms` milliseconds of random delay into each store call.
    #[must_use]
    pub fn with_store_latency(mut self, max_ms: Option<u64>) -> Self {
        self.store_latency_ms = max_ms;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
