//! Event producers.
//!
//! # Data Flow
//! ```text
//! console input  → stdin.rs (line reader task)   → mpsc(1) ─┐
//!                                                            ├→ multiplexer
//! TCP :8888      → http.rs (axum serve + router) → mpsc(1) ─┘
//! ```
//!
//! # Design Decisions
//! - Each producer owns its sender and is the only one that closes it
//! - Channels hold a single event; producers wait for the consumer
//! - A producer that is cancelled while waiting drops the pending event
//! - Every producer registers with the completion barrier and completes on
//!   its terminal transition, whatever caused it

pub mod http;
pub mod stdin;

pub use http::{HttpIngress, IngressState};
pub use stdin::LineSource;

/// Capacity of every producer's event channel.
pub const EVENT_BUFFER: usize = 1;
