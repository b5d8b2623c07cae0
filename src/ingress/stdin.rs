//! Line source: console input as events.
//!
//! Reads newline-delimited text and emits one [`Event`] per line. The task
//! ends on end-of-input, on a read error, or on cancellation; in every case it
//! closes its channel and completes its barrier guard.
//!
//! Tokio reads stdin on a blocking thread that cannot be interrupted. Racing
//! the read against the token lets this task finish promptly, but the
//! underlying OS read lingers until a line arrives or the process exits.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::event::Event;
use crate::ingress::EVENT_BUFFER;
use crate::lifecycle::Shutdown;

/// Producer reading lines from an async reader.
pub struct LineSource;

impl LineSource {
    /// Spawn a line source over any buffered reader.
    pub fn spawn<R>(reader: R, shutdown: &Shutdown) -> mpsc::Receiver<Event>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let guard = shutdown.register("stdin");
        let token = shutdown.token();

        tokio::spawn(async move {
            let mut reader = reader;
            let mut buf = Vec::new();
            let mut lines = 0u64;

            loop {
                buf.clear();
                let read = tokio::select! {
                    _ = token.cancelled() => break,
                    res = reader.read_until(b'\n', &mut buf) => res,
                };

                match read {
                    Ok(0) => {
                        tracing::info!(lines, "Standard input closed");
                        break;
                    }
                    Ok(_) => {
                        let event = Event::stdin(decode_line(&buf));
                        tokio::select! {
                            _ = token.cancelled() => {
                                tracing::debug!("Cancelled while delivering line, dropping it");
                                break;
                            }
                            res = tx.send(event) => {
                                if res.is_err() {
                                    break;
                                }
                                lines += 1;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read standard input");
                        break;
                    }
                }
            }

            drop(tx);
            guard.complete();
        });

        rx
    }
}

/// Strip the line terminator (`\n` or `\r\n`) and decode as UTF-8, lossily.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
