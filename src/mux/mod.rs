//! Event multiplexer: the single consumer loop.
//!
//! # Data Flow
//! ```text
//! token.cancelled() ─┐
//! signals (mpsc 1)  ─┤
//! stdin   (mpsc 1)  ─┼→ Multiplexer::step → EventHandler::handle
//! http    (mpsc 1)  ─┘
//! ```
//!
//! # Design Decisions
//! - `tokio::select!` without `biased`: ready branches are picked at random,
//!   so no source has priority over another
//! - A signal only requests cancellation; the loop ends when the token is
//!   observed on a later step
//! - A closed producer channel is disabled rather than read as an empty event

use std::io::{self, Write};

use tokio::sync::mpsc;

use crate::event::{Event, Source};
use crate::lifecycle::{Shutdown, Signal};

/// Receives every event the multiplexer dispatches.
///
/// Called on the multiplexer's task; implementations must not block.
pub trait EventHandler {
    fn handle(&mut self, event: Event);
}

/// Collects events in arrival order.
impl EventHandler for Vec<Event> {
    fn handle(&mut self, event: Event) {
        self.push(event);
    }
}

/// Writes each event's console record as one line.
#[derive(Debug)]
pub struct ConsoleHandler<W> {
    out: W,
}

impl ConsoleHandler<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleHandler<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventHandler for ConsoleHandler<W> {
    fn handle(&mut self, event: Event) {
        if let Err(e) = writeln!(self.out, "{event}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, source = %event.source, "Failed to write message record");
        }
    }
}

/// Outcome of one multiplexer iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Something was handled; keep looping.
    Continue,
    /// Cancellation was observed; the loop is over.
    Terminated,
}

/// Merges producer channels, signals and cancellation into one loop.
pub struct Multiplexer<H> {
    shutdown: Shutdown,
    stdin: mpsc::Receiver<Event>,
    http: mpsc::Receiver<Event>,
    signals: mpsc::Receiver<Signal>,
    stdin_open: bool,
    http_open: bool,
    signals_open: bool,
    handler: H,
}

impl<H: EventHandler> Multiplexer<H> {
    pub fn new(
        shutdown: Shutdown,
        stdin: mpsc::Receiver<Event>,
        http: mpsc::Receiver<Event>,
        signals: mpsc::Receiver<Signal>,
        handler: H,
    ) -> Self {
        Self {
            shutdown,
            stdin,
            http,
            signals,
            stdin_open: true,
            http_open: true,
            signals_open: true,
            handler,
        }
    }

    /// Block until exactly one source is ready and handle it.
    ///
    /// Returns [`Step::Terminated`] straight away, without touching any
    /// channel, if cancellation was already requested.
    pub async fn step(&mut self) -> Step {
        if self.shutdown.is_cancelled() {
            return Step::Terminated;
        }

        tokio::select! {
            _ = self.shutdown.cancelled() => Step::Terminated,
            signal = self.signals.recv(), if self.signals_open => {
                match signal {
                    Some(signal) => {
                        tracing::info!(?signal, "Caught signal, shutting down");
                        self.shutdown.cancel();
                    }
                    None => self.signals_open = false,
                }
                Step::Continue
            }
            event = self.stdin.recv(), if self.stdin_open => self.dispatch(Source::Stdin, event),
            event = self.http.recv(), if self.http_open => self.dispatch(Source::Http, event),
        }
    }

    fn dispatch(&mut self, source: Source, event: Option<Event>) -> Step {
        match event {
            Some(event) => self.handler.handle(event),
            None => {
                tracing::debug!(%source, "Producer channel closed");
                match source {
                    Source::Stdin => self.stdin_open = false,
                    Source::Http => self.http_open = false,
                }
            }
        }
        Step::Continue
    }

    /// Loop until cancellation is observed, then hand back the handler.
    pub async fn run(mut self) -> H {
        tracing::info!("Multiplexer running");
        while self.step().await == Step::Continue {}
        tracing::info!("Shutting down...");
        self.handler
    }
}
