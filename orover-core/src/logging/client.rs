//! Forwards [`LogRecord`]s to the log server over a length-prefixed TCP
//! stream (§4.7), grounded on `logserver.py`'s 4-byte big-endian length
//! prefix framing.
//!
//! A record is handed off to a background task over an unbounded channel so
//! that logging a message never blocks, or fails, the actor that emits it
//! (mirrors `logging.handlers.SocketHandler`'s fire-and-forget delivery,
//! queueing while the server is unreachable and reconnecting behind the
//! scenes).

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use futures::SinkExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::warn;

// Layer 3: Internal module imports
use super::record::LogRecord;

const RECONNECT_DELAY: Duration = Duration::from_millis(500);

/// A handle to the background task that owns the actual TCP connection.
#[derive(Clone)]
pub struct LogClient {
    tx: UnboundedSender<LogRecord>,
}

impl LogClient {
    /// Spawn the forwarding task and return immediately; the connection is
    /// established lazily on the first record.
    pub fn connect_background(endpoint: String) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(forward_loop(endpoint, rx));
        Self { tx }
    }

    /// Queue one record for delivery. Silently dropped if the background
    /// task has already exited.
    pub fn send(&self, record: LogRecord) {
        let _ = self.tx.send(record);
    }
}

async fn forward_loop(endpoint: String, mut rx: mpsc::UnboundedReceiver<LogRecord>) {
    loop {
        let stream = match TcpStream::connect(&endpoint).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!(%endpoint, error = %e, "log server unreachable, retrying");
                tokio::time::sleep(RECONNECT_DELAY).await;
                continue;
            }
        };
        let mut framed = Framed::new(stream, LengthDelimitedCodec::new());
        while let Some(record) = rx.recv().await {
            let Ok(bytes) = serde_json::to_vec(&record) else {
                continue;
            };
            if framed.send(bytes.into()).await.is_err() {
                warn!(%endpoint, "log server connection dropped, reconnecting");
                break;
            }
        }
        if rx.is_closed() {
            return;
        }
    }
}
