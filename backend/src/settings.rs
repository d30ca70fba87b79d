//! Server settings loaded via OrthoConfig.
//!
//! Values come from `POINT_LEDGER_*` environment variables, configuration
//! files or command-line flags, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("bind address `{value}` is not a socket address: {reason}")]
    InvalidBindAddr { value: String, reason: String },
}

/// Runtime configuration for the ledger server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POINT_LEDGER")]
pub struct ServerSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Upper bound of the random delay injected into each store call.
    /// Zero disables the delay.
    #[ortho_config(default = 0)]
    pub store_latency_ms: u64,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                reason: err.to_string(),
            })
    }

    /// Simulated store latency; `None` when disabled.
    pub fn store_latency_ms(&self) -> Option<u64> {
        (self.store_latency_ms > 0).then_some(self.store_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("point-ledger")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("POINT_LEDGER_BIND_ADDR", None::<String>),
            ("POINT_LEDGER_STORE_LATENCY_MS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr, None);
        assert_eq!(settings.store_latency_ms, 0);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.store_latency_ms(), None);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("POINT_LEDGER_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("POINT_LEDGER_STORE_LATENCY_MS", Some("250".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9090)))
        );
        assert_eq!(settings.store_latency_ms(), Some(250));
    }

    #[rstest]
    fn bind_addr_alone_loads_with_latency_default() {
        let _guard = lock_env([
            ("POINT_LEDGER_BIND_ADDR", Some("127.0.0.1:7070".to_owned())),
            ("POINT_LEDGER_STORE_LATENCY_MS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 7070)))
        );
        assert_eq!(settings.store_latency_ms(), None);
    }

    #[rstest]
    fn zero_latency_disables_simulation() {
        let settings = ServerSettings {
            bind_addr: None,
            store_latency_ms: 0,
        };
        assert_eq!(settings.store_latency_ms(), None);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("localhost".to_owned()),
            store_latency_ms: 0,
        };
        let err = settings.bind_addr().expect_err("not a socket address");
        assert!(matches!(err, SettingsError::InvalidBindAddr { ref value, .. } if value == "localhost"));
    }
}
