//! OS signal handling.
//!
//! # Responsibilities
//! - Register interest in SIGINT (Ctrl-C) and, on Unix, SIGTERM
//! - Translate notifications into [`Signal`] values on a one-slot channel
//!
//! # Design Decisions
//! - The watcher never cancels anything; the multiplexer decides
//! - A notification arriving while the slot is full is dropped, so repeated
//!   interrupts during shutdown have no extra effect

use tokio::sync::mpsc;

/// An OS notification relevant to shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Interrupt,
    Terminate,
}

/// Background task forwarding OS signals.
pub struct SignalWatcher;

impl SignalWatcher {
    /// Spawn the watcher and return the receiving end of its channel.
    pub fn spawn() -> mpsc::Receiver<Signal> {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            loop {
                let signal = match next_signal().await {
                    Ok(signal) => signal,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to listen for OS signals");
                        return;
                    }
                };
                match tx.try_send(signal) {
                    Ok(()) => tracing::debug!(?signal, "Signal forwarded"),
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::debug!(?signal, "Signal slot full, dropping");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => return,
                }
            }
        });
        rx
    }
}

#[cfg(unix)]
async fn next_signal() -> std::io::Result<Signal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|()| Signal::Interrupt),
        _ = term.recv() => Ok(Signal::Terminate),
    }
}

#[cfg(not(unix))]
async fn next_signal() -> std::io::Result<Signal> {
    tokio::signal::ctrl_c().await.map(|()| Signal::Interrupt)
}
