//! Completion barrier for producer teardown.
//!
//! Each producer registers once at startup and receives a [`CompletionGuard`].
//! The guard counts the barrier down when it is dropped, which happens exactly
//! once, on the producer's terminal transition.

use std::sync::Arc;
use tokio::sync::watch;

/// Tracks how many producers have not yet finished shutting down.
#[derive(Debug, Clone)]
pub struct CompletionBarrier {
    /// Pending producer count, observable by waiters.
    pending: Arc<watch::Sender<usize>>,
}

impl CompletionBarrier {
    /// Create a barrier with no registered producers.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self {
            pending: Arc::new(tx),
        }
    }

    /// Register a producer. Returns a guard that counts down on drop.
    pub fn register(&self, producer: &'static str) -> CompletionGuard {
        self.pending.send_modify(|n| *n += 1);
        tracing::debug!(producer, pending = self.pending(), "Producer registered");
        CompletionGuard {
            pending: Arc::clone(&self.pending),
            producer,
        }
    }

    /// Number of producers still running.
    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    /// Wait until every registered producer has completed.
    pub async fn wait(&self) {
        let mut rx = self.pending.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

impl Default for CompletionBarrier {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof of one producer's registration with a [`CompletionBarrier`].
#[derive(Debug)]
pub struct CompletionGuard {
    pending: Arc<watch::Sender<usize>>,
    producer: &'static str,
}

impl CompletionGuard {
    /// Name the producer registered under.
    pub fn producer(&self) -> &'static str {
        self.producer
    }

    /// Mark the producer as finished. Equivalent to dropping the guard.
    pub fn complete(self) {}
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.pending.send_modify(|n| *n = n.saturating_sub(1));
        tracing::debug!(producer = self.producer, "Producer completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn barrier_counts() {
        let barrier = CompletionBarrier::new();
        assert_eq!(barrier.pending(), 0);

        let stdin = barrier.register("stdin");
        let http = barrier.register("http");
        assert_eq!(barrier.pending(), 2);

        stdin.complete();
        assert_eq!(barrier.pending(), 1);

        drop(http);
        assert_eq!(barrier.pending(), 0);
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_empty() {
        let barrier = CompletionBarrier::new();
        tokio::time::timeout(Duration::from_secs(1), barrier.wait())
            .await
            .expect("empty barrier should not block");
    }

    #[tokio::test]
    async fn wait_blocks_until_last_guard_drops() {
        let barrier = CompletionBarrier::new();
        let guard = barrier.register("stdin");

        let waiter = {
            let barrier = barrier.clone();
            tokio::spawn(async move { barrier.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish after guard drops")
            .unwrap();
    }
}
