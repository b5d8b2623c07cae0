//! HTTP ingress: request bodies as events.
//!
//! # Responsibilities
//! - Bind the listener and serve every method and path with one handler
//! - Read each request body in full and emit it as one [`Event`]
//! - Shut the listener down gracefully on cancellation, then close the channel
//!
//! # State Machine
//! ```text
//! Starting → Serving → ShuttingDown → Closed
//!     │                                  ▲
//!     └──────── bind failure ────────────┘
//! ```
//!
//! # Design Decisions
//! - The handler lives in [`router`] so it can be driven without a socket
//! - Body read errors are logged and produce an empty event
//! - Bind/serve errors are logged; `strict` also faults the shutdown
//! - No shutdown deadline beyond what graceful shutdown itself provides

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::config::HttpConfig;
use crate::error::IngressError;
use crate::event::Event;
use crate::ingress::EVENT_BUFFER;
use crate::lifecycle::{CompletionGuard, Shutdown};

/// Lifecycle of the HTTP listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngressState {
    /// Binding the listener.
    Starting,
    /// Accepting connections.
    Serving,
    /// Cancelled; draining in-flight requests.
    ShuttingDown,
    /// Listener stopped and event channel closed.
    Closed,
}

/// State shared with the request handler.
#[derive(Clone)]
struct IngressContext {
    tx: mpsc::Sender<Event>,
    token: CancellationToken,
}

/// Build the handler router: any method, any path, body becomes one event.
pub fn router(tx: mpsc::Sender<Event>, token: CancellationToken) -> Router {
    Router::new()
        .fallback(ingest)
        .with_state(IngressContext { tx, token })
        .layer(TraceLayer::new_for_http())
}

async fn ingest(State(ctx): State<IngressContext>, request: Request) -> StatusCode {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let body = match axum::body::to_bytes(request.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%method, %path, error = %e, "Failed to read request body");
            Bytes::new()
        }
    };

    tracing::debug!(%method, %path, bytes = body.len(), "Request received");
    let event = Event::http(String::from_utf8_lossy(&body));

    tokio::select! {
        _ = ctx.token.cancelled() => {
            tracing::debug!(%path, "Cancelled while delivering request body, dropping it");
        }
        res = ctx.tx.send(event) => {
            if res.is_err() {
                tracing::debug!(%path, "Event channel closed, dropping request body");
            }
        }
    }

    StatusCode::OK
}

/// Handle to a running HTTP ingress.
#[derive(Debug)]
pub struct HttpIngress {
    events: mpsc::Receiver<Event>,
    local_addr: Option<SocketAddr>,
    state: watch::Receiver<IngressState>,
}

impl HttpIngress {
    /// Bind the configured address and start serving in the background.
    ///
    /// Bind failures are logged rather than returned; the ingress then reports
    /// [`IngressState::Closed`] and its event channel is already closed.
    pub async fn start(config: &HttpConfig, shutdown: &Shutdown) -> Self {
        let (tx, events) = mpsc::channel(EVENT_BUFFER);
        let (state_tx, state) = watch::channel(IngressState::Starting);
        let state_tx = Arc::new(state_tx);
        let guard = shutdown.register("http");

        let listener = match bind(&config.bind_address).await {
            Ok(listener) => listener,
            Err(e) => {
                report(&e, config.strict, shutdown);
                state_tx.send_replace(IngressState::Closed);
                drop(tx);
                guard.complete();
                return Self {
                    events,
                    local_addr: None,
                    state,
                };
            }
        };

        let local_addr = listener.local_addr().ok();
        if let Some(address) = local_addr {
            tracing::info!(%address, "Listening for HTTP requests");
        }
        state_tx.send_replace(IngressState::Serving);

        let app = router(tx, shutdown.token());
        tokio::spawn(serve(
            listener,
            app,
            shutdown.clone(),
            state_tx,
            guard,
            config.strict,
        ));

        Self {
            events,
            local_addr,
            state,
        }
    }

    /// Receive the next request body; `None` once the ingress has closed.
    pub async fn recv(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// Give up the handle, keeping only the event channel.
    pub fn into_events(self) -> mpsc::Receiver<Event> {
        self.events
    }

    /// Address actually bound, if binding succeeded.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Current lifecycle state.
    pub fn state(&self) -> IngressState {
        *self.state.borrow()
    }

    /// Wait until the listener has stopped and the channel is closed.
    pub async fn closed(&mut self) {
        // The serving task sets `Closed` before dropping its sender.
        let _ = self.state.wait_for(|s| *s == IngressState::Closed).await;
    }
}

async fn bind(address: &str) -> Result<TcpListener, IngressError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| IngressError::Bind {
            address: address.to_string(),
            source,
        })
}

fn report(error: &IngressError, strict: bool, shutdown: &Shutdown) {
    tracing::error!(error = %error, strict, "HTTP ingress failed");
    if strict {
        shutdown.fail(error.to_string());
    }
}

/// Accept loop plus shutdown watcher. The router owns the only sender, so the
/// event channel closes once `axum::serve` returns and drops it.
async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: Shutdown,
    state_tx: Arc<watch::Sender<IngressState>>,
    guard: CompletionGuard,
    strict: bool,
) {
    let address = listener
        .local_addr()
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 0)));

    let drain = {
        let token = shutdown.token();
        let state_tx = Arc::clone(&state_tx);
        async move {
            token.cancelled().await;
            state_tx.send_replace(IngressState::ShuttingDown);
            tracing::info!(%address, "HTTP ingress shutting down");
        }
    };

    if let Err(source) = axum::serve(listener, app)
        .with_graceful_shutdown(drain)
        .await
    {
        report(&IngressError::Serve { address, source }, strict, &shutdown);
    }

    state_tx.send_replace(IngressState::Closed);
    tracing::info!(%address, "HTTP ingress stopped");
    guard.complete();
}
