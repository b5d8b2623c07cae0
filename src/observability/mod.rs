//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → logging.rs subscriber (EnvFilter + fmt layer on stderr)
//! ```

pub mod logging;

pub use logging::init_logging;
