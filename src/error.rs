//! Error types shared across the tap.
//!
//! Producer-local errors ([`IngressError`], line read failures) are logged where
//! they happen and never leave their producer. Only [`ShutdownError`] reaches
//! the process exit path.

use std::net::SocketAddr;

/// Failures of the HTTP listener.
#[derive(Debug, thiserror::Error)]
pub enum IngressError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server on {address} failed: {source}")]
    Serve {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Teardown ended for a reason other than a user request.
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("unexpected shutdown: {0}")]
    Unexpected(String),
}
