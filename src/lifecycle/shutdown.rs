//! Shutdown coordination for the tap.

use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;

use crate::error::ShutdownError;
use crate::lifecycle::barrier::{CompletionBarrier, CompletionGuard};

/// Why cancellation was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Orderly stop, e.g. the user pressed Ctrl-C.
    UserRequested,
    /// A component hit an error it could not absorb.
    Fault(String),
}

/// Coordinator for graceful shutdown.
///
/// Owns the process-wide cancellation token and the completion barrier.
/// Clones share both, so any holder may request cancellation; the first
/// request decides the [`ShutdownReason`] and every later one is a no-op.
#[derive(Debug, Clone)]
pub struct Shutdown {
    token: CancellationToken,
    reason: Arc<OnceLock<ShutdownReason>>,
    barrier: CompletionBarrier,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            reason: Arc::new(OnceLock::new()),
            barrier: CompletionBarrier::new(),
        }
    }

    /// Clone of the cancellation token for distributing to producers.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Register a producer with the completion barrier.
    pub fn register(&self, producer: &'static str) -> CompletionGuard {
        self.barrier.register(producer)
    }

    /// The completion barrier shared by this coordinator.
    pub fn barrier(&self) -> &CompletionBarrier {
        &self.barrier
    }

    /// Request an orderly shutdown.
    pub fn cancel(&self) {
        self.trigger(ShutdownReason::UserRequested);
    }

    /// Request shutdown because of an unrecoverable fault.
    pub fn fail(&self, reason: impl Into<String>) {
        self.trigger(ShutdownReason::Fault(reason.into()));
    }

    fn trigger(&self, reason: ShutdownReason) {
        if self.reason.set(reason.clone()).is_ok() {
            tracing::debug!(?reason, "Cancellation requested");
        } else {
            tracing::trace!(?reason, "Cancellation already requested");
        }
        self.token.cancel();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// The reason recorded by the first cancellation request, if any.
    pub fn reason(&self) -> Option<&ShutdownReason> {
        self.reason.get()
    }

    /// Final teardown: cancel, wait for every producer, then check the reason.
    ///
    /// Returns an error when the shutdown was not user-requested.
    pub async fn finish(&self) -> Result<(), ShutdownError> {
        self.cancel();

        tracing::info!(pending = self.barrier.pending(), "Waiting for producers to close");
        self.barrier.wait().await;

        match self.reason() {
            Some(ShutdownReason::Fault(reason)) => Err(ShutdownError::Unexpected(reason.clone())),
            _ => Ok(()),
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn finish_after_user_cancel_is_ok() {
        let shutdown = Shutdown::new();
        shutdown.cancel();
        assert!(shutdown.is_cancelled());
        assert_eq!(shutdown.reason(), Some(&ShutdownReason::UserRequested));
        assert!(shutdown.finish().await.is_ok());
    }

    #[tokio::test]
    async fn first_reason_wins() {
        let shutdown = Shutdown::new();
        shutdown.fail("listener died");
        shutdown.cancel();
        shutdown.fail("second fault");

        assert_eq!(
            shutdown.reason(),
            Some(&ShutdownReason::Fault("listener died".into()))
        );
        let err = shutdown.finish().await.unwrap_err();
        assert!(err.to_string().contains("listener died"));
    }

    #[tokio::test]
    async fn finish_waits_for_registered_producers() {
        let shutdown = Shutdown::new();
        let guard = shutdown.register("stdin");

        let producer = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                shutdown.cancelled().await;
                tokio::time::sleep(Duration::from_millis(20)).await;
                guard.complete();
            })
        };

        tokio::time::timeout(Duration::from_secs(1), shutdown.finish())
            .await
            .expect("finish should not hang")
            .unwrap();
        assert_eq!(shutdown.barrier().pending(), 0);
        producer.await.unwrap();
    }

    #[tokio::test]
    async fn redundant_cancellation_after_close_is_noop() {
        let shutdown = Shutdown::new();
        let guard = shutdown.register("http");
        drop(guard);

        shutdown.cancel();
        shutdown.cancel();
        assert_eq!(shutdown.barrier().pending(), 0);

        tokio::time::timeout(Duration::from_secs(1), shutdown.finish())
            .await
            .expect("finish should not block")
            .unwrap();
        assert_eq!(shutdown.barrier().pending(), 0);
    }
}
