//! Configuration schema definitions.
//!
//! All types derive `Deserialize` and default every field, so an empty
//! document is a valid configuration.

use serde::Deserialize;

/// Port the HTTP ingress listens on unless configured otherwise.
pub const DEFAULT_HTTP_PORT: u16 = 8888;

/// Root configuration for the tap.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TapConfig {
    /// HTTP ingress settings.
    pub http: HttpConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// HTTP ingress configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address (e.g., "0.0.0.0:8888").
    pub bind_address: String,

    /// Escalate bind/serve failures to a faulted shutdown instead of only
    /// logging them.
    pub strict: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("0.0.0.0:{DEFAULT_HTTP_PORT}"),
            strict: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `tracing` filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "echo_tap=info,tower_http=warn".to_string(),
        }
    }
}
