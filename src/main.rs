//! Echo tap.
//!
//! # Architecture Overview
//!
//! ```text
//!   console ──▶ LineSource ──┐
//!                            │   ┌─────────────┐
//!   :8888 ──▶ HttpIngress ───┼──▶│ Multiplexer │──▶ stdout records
//!                            │   └──────┬──────┘
//!   SIGINT ─▶ SignalWatcher ─┘          │ cancel
//!                                       ▼
//!                     Shutdown (token + completion barrier)
//! ```

use std::process::ExitCode;

use tokio::io::BufReader;

use echo_tap::config::TapConfig;
use echo_tap::lifecycle::{Shutdown, SignalWatcher};
use echo_tap::mux::ConsoleHandler;
use echo_tap::observability;

fn main() -> ExitCode {
    // No flags and no config file: the tap always runs on defaults.
    let config = TapConfig::default();

    if let Err(e) = observability::init_logging(&config.observability) {
        eprintln!("failed to initialise logging: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async {
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "echo-tap running");

        let shutdown = Shutdown::new();
        let input = BufReader::new(tokio::io::stdin());
        echo_tap::app::run(
            &config,
            shutdown,
            input,
            SignalWatcher::spawn(),
            ConsoleHandler::stdout(),
        )
        .await
    });

    // The stdin reader may still be parked in a blocking read; don't wait on it.
    runtime.shutdown_background();

    match result {
        Ok(_) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Shutdown failed");
            ExitCode::FAILURE
        }
    }
}
