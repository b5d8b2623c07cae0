//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → one-slot channel → multiplexer
//!
//! Shutdown (shutdown.rs):
//!     multiplexer → Shutdown::cancel → token observed by every producer
//!     producers close their channels → drop CompletionGuard
//!
//! Barrier (barrier.rs):
//!     Shutdown::finish waits until every guard is dropped → exit code
//! ```
//!
//! # Design Decisions
//! - Cancellation is one-shot and idempotent; the first reason is kept
//! - The barrier is passed to producers explicitly, never global state
//! - No shutdown deadline: teardown waits on the producers themselves

pub mod barrier;
pub mod shutdown;
pub mod signals;

pub use barrier::{CompletionBarrier, CompletionGuard};
pub use shutdown::{Shutdown, ShutdownReason};
pub use signals::{Signal, SignalWatcher};
