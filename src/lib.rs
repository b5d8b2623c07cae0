//! Echo tap library.
//!
//! Merges console lines and HTTP request bodies into one event stream and
//! shuts down cleanly on interrupt.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod ingress;
pub mod lifecycle;
pub mod mux;
pub mod observability;

pub use config::TapConfig;
pub use event::{Event, Source};
pub use lifecycle::Shutdown;
pub use mux::Multiplexer;
