//! Top-level wiring: producers, multiplexer, teardown.

use std::net::SocketAddr;

use tokio::io::AsyncBufRead;
use tokio::sync::mpsc;

use crate::config::TapConfig;
use crate::error::ShutdownError;
use crate::ingress::{HttpIngress, LineSource};
use crate::lifecycle::{Shutdown, Signal};
use crate::mux::{EventHandler, Multiplexer};

/// A tap whose producers are running but whose loop has not started.
pub struct Tap<H> {
    shutdown: Shutdown,
    mux: Multiplexer<H>,
    http_addr: Option<SocketAddr>,
}

impl<H: EventHandler> Tap<H> {
    /// Spawn the line source and bind the HTTP ingress.
    pub async fn start<R>(
        config: &TapConfig,
        shutdown: Shutdown,
        input: R,
        signals: mpsc::Receiver<Signal>,
        handler: H,
    ) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let stdin = LineSource::spawn(input, &shutdown);
        let http = HttpIngress::start(&config.http, &shutdown).await;
        let http_addr = http.local_addr();

        let mux = Multiplexer::new(shutdown.clone(), stdin, http.into_events(), signals, handler);
        Self {
            shutdown,
            mux,
            http_addr,
        }
    }

    /// Address the HTTP ingress bound, if binding succeeded.
    pub fn http_addr(&self) -> Option<SocketAddr> {
        self.http_addr
    }

    /// Run the loop until cancellation, then wait for every producer to close.
    ///
    /// Returns the handler on an orderly shutdown and an error if the shutdown
    /// was caused by a fault.
    pub async fn run(self) -> Result<H, ShutdownError> {
        let handler = self.mux.run().await;
        self.shutdown.finish().await?;
        Ok(handler)
    }
}

/// Start a [`Tap`] and run it to completion.
pub async fn run<R, H>(
    config: &TapConfig,
    shutdown: Shutdown,
    input: R,
    signals: mpsc::Receiver<Signal>,
    handler: H,
) -> Result<H, ShutdownError>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    H: EventHandler,
{
    Tap::start(config, shutdown, input, signals, handler)
        .await
        .run()
        .await
}
