//! The event bus broker (§4.4): a long-running proxy relaying publications
//! from the producer-facing endpoint to the consumer-facing endpoint.
//!
//! Grounded on `eventbus.py`'s `zmq.proxy(b.sub, b.pub)`: every frame the
//! producer-facing side receives is fanned out, unmodified, to every
//! consumer connected on the consumer-facing side. Frame fan-out uses a
//! [`tokio::sync::broadcast`] channel, whose drop-on-lag behavior is exactly
//! the best-effort, no-retry delivery semantics §5 documents: a slow
//! subscriber loses frames rather than stalling the broker.
//!
//! Simplification from true XSUB/XPUB (documented as an open-question
//! resolution in the design ledger): a consumer declares its subscription
//! prefix once, in a single line, immediately after connecting, rather than
//! being able to resubscribe dynamically mid-connection. The actor
//! framework's own subscriber always declares the empty prefix (all
//! traffic) and filters client-side (§4.5), so this covers every actor in
//! practice; only a bespoke test client exercising the broker's own
//! prefix-filtering capability (§8 "Topic filtering") needs the one-shot
//! declaration.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, warn};

// Layer 3: Internal module imports
use super::endpoint::to_bind_addr;
use super::error::BrokerError;

/// Default broadcast channel capacity: how many in-flight frames a lagging
/// consumer may fall behind by before frames start being dropped for it.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Long-running proxy between the producer-facing and consumer-facing bus
/// endpoints.
pub struct EventBusProxy {
    xsub_bind: String,
    xpub_bind: String,
    channel_capacity: usize,
}

impl EventBusProxy {
    /// Build a proxy that will bind `xsub_endpoint` (producer-facing) and
    /// `xpub_endpoint` (consumer-facing) when [`run`](Self::run) is called.
    pub fn new(xsub_endpoint: &str, xpub_endpoint: &str) -> Result<Self, BrokerError> {
        Ok(Self {
            xsub_bind: to_bind_addr(xsub_endpoint)?,
            xpub_bind: to_bind_addr(xpub_endpoint)?,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        })
    }

    /// Override the broadcast channel's lag tolerance. Mostly useful for
    /// tests that want to observe the drop behavior deterministically.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Bind both endpoints and relay forever. Bind failure is fatal (§4.4,
    /// §7); runs until the process is terminated.
    pub async fn run(self) -> Result<(), BrokerError> {
        let xsub_listener =
            TcpListener::bind(&self.xsub_bind)
                .await
                .map_err(|source| BrokerError::BindFailed {
                    addr: self.xsub_bind.clone(),
                    source,
                })?;
        let xpub_listener =
            TcpListener::bind(&self.xpub_bind)
                .await
                .map_err(|source| BrokerError::BindFailed {
                    addr: self.xpub_bind.clone(),
                    source,
                })?;

        let (tx, _rx) = broadcast::channel::<Arc<str>>(self.channel_capacity);

        debug!(xsub = %self.xsub_bind, xpub = %self.xpub_bind, "event bus bound, proxying");

        let producer_tx = tx.clone();
        let producer_side = async move {
            loop {
                match xsub_listener.accept().await {
                    Ok((socket, peer)) => {
                        debug!(%peer, "producer connected");
                        tokio::spawn(relay_from_producer(socket, producer_tx.clone()));
                    }
                    Err(e) => warn!(error = %e, "producer accept failed"),
                }
            }
        };

        let consumer_side = async move {
            loop {
                match xpub_listener.accept().await {
                    Ok((socket, peer)) => {
                        debug!(%peer, "consumer connected");
                        tokio::spawn(relay_to_consumer(socket, tx.subscribe()));
                    }
                    Err(e) => warn!(error = %e, "consumer accept failed"),
                }
            }
        };

        tokio::join!(producer_side, consumer_side);
        Ok(())
    }
}

async fn relay_from_producer(socket: TcpStream, tx: broadcast::Sender<Arc<str>>) {
    let mut framed = Framed::new(socket, LinesCodec::new());
    while let Some(frame) = framed.next().await {
        match frame {
            Ok(line) => {
                // Best-effort fan-out (§4.4): no subscribers is not an error.
                let _ = tx.send(Arc::from(line.as_str()));
            }
            Err(e) => {
                warn!(error = %e, "producer connection error, closing");
                break;
            }
        }
    }
}

async fn relay_to_consumer(socket: TcpStream, mut rx: broadcast::Receiver<Arc<str>>) {
    let mut framed = Framed::new(socket, LinesCodec::new());
    let prefix = match framed.next().await {
        Some(Ok(line)) => parse_subscription(&line),
        _ => return,
    };

    loop {
        match rx.recv().await {
            Ok(frame) => {
                if frame.starts_with(prefix.as_str()) && framed.send(frame.to_string()).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "consumer lagged, frames dropped (best-effort delivery)");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// `"SUB event."` → `"event."`; any other first line (or none at all) is
/// treated as an empty-prefix (all-traffic) subscription, matching the
/// actor framework's default.
fn parse_subscription(line: &str) -> String {
    line.strip_prefix("SUB ").unwrap_or("").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_explicit_subscription_prefix() {
        assert_eq!(parse_subscription("SUB event."), "event.");
    }

    #[test]
    fn non_subscription_line_means_all_traffic() {
        assert_eq!(parse_subscription("garbage"), "");
    }
}
