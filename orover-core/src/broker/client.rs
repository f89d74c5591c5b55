//! Client-side publish and subscribe sockets that every actor connects with
//! (§4.5), grounded on `base_process.py`'s `create_pub_socket`/
//! `create_sub_socket`.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::{Framed, LinesCodec};

// Layer 3: Internal module imports
use super::endpoint::to_connect_addr;
use super::error::BrokerError;

/// Default send/receive timeout (§5: `send_timeout`/`receive_timeout`,
/// default 2500ms).
pub const DEFAULT_TRANSPORT_TIMEOUT: Duration = Duration::from_millis(2500);

/// Producer-facing client socket: connects to `client_pub_socket`, the
/// broker's producer-facing endpoint.
pub struct BusPublisher {
    framed: Framed<TcpStream, LinesCodec>,
    send_timeout: Duration,
}

impl BusPublisher {
    /// Connect to the broker's producer-facing endpoint.
    pub async fn connect(endpoint: &str) -> Result<Self, BrokerError> {
        let addr = to_connect_addr(endpoint)?;
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| BrokerError::ConnectFailed { addr, source })?;
        Ok(Self {
            framed: Framed::new(stream, LinesCodec::new()),
            send_timeout: DEFAULT_TRANSPORT_TIMEOUT,
        })
    }

    /// Override the send timeout (from `orover`/`send_timeout` config).
    pub fn with_send_timeout(mut self, duration: Duration) -> Self {
        self.send_timeout = duration;
        self
    }

    /// Send one already-encoded wire frame (`"<topic> <json>"`).
    pub async fn send_frame(&mut self, frame: String) -> Result<(), BrokerError> {
        timeout(self.send_timeout, self.framed.send(frame))
            .await
            .map_err(|_| BrokerError::SendTimeout)?
            .map_err(BrokerError::Transport)
    }
}

/// Consumer-facing client socket: connects to `client_sub_socket`, the
/// broker's consumer-facing endpoint, and declares its topic prefix once.
pub struct BusSubscriber {
    framed: Framed<TcpStream, LinesCodec>,
    receive_timeout: Duration,
}

impl BusSubscriber {
    /// Connect and subscribe to every frame whose topic starts with
    /// `prefix` (empty string subscribes to all traffic, the framework
    /// default per §4.5).
    pub async fn connect(endpoint: &str, prefix: &str) -> Result<Self, BrokerError> {
        let addr = to_connect_addr(endpoint)?;
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| BrokerError::ConnectFailed { addr, source })?;
        let mut framed = Framed::new(stream, LinesCodec::new());
        framed
            .send(format!("SUB {prefix}"))
            .await
            .map_err(BrokerError::Transport)?;
        Ok(Self {
            framed,
            receive_timeout: DEFAULT_TRANSPORT_TIMEOUT,
        })
    }

    /// Override the receive timeout (from `orover`/`receive_timeout` config).
    pub fn with_receive_timeout(mut self, duration: Duration) -> Self {
        self.receive_timeout = duration;
        self
    }

    /// Block for one topic-prefixed frame, re-entering on timeout so the
    /// caller can check its `running` flag (§5 suspension points).
    pub async fn recv_frame(&mut self) -> Result<Option<String>, BrokerError> {
        match timeout(self.receive_timeout, self.framed.next()).await {
            Ok(Some(Ok(line))) => Ok(Some(line)),
            Ok(Some(Err(e))) => Err(BrokerError::Transport(e.into())),
            Ok(None) => Ok(None),
            Err(_) => Err(BrokerError::ReceiveTimeout),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::broker::proxy::EventBusProxy;

    #[tokio::test]
    async fn publisher_and_subscriber_round_trip_through_proxy() {
        // Bind to ephemeral ports directly to discover them for the clients.
        let xsub = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let xpub = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let xsub_addr = xsub.local_addr().unwrap();
        let xpub_addr = xpub.local_addr().unwrap();
        drop(xsub);
        drop(xpub);

        let proxy = EventBusProxy::new(
            &format!("tcp://{xsub_addr}"),
            &format!("tcp://{xpub_addr}"),
        )
        .unwrap();
        tokio::spawn(proxy.run());
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut subscriber = BusSubscriber::connect(&format!("tcp://{xpub_addr}"), "")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut publisher = BusPublisher::connect(&format!("tcp://{xsub_addr}"))
            .await
            .unwrap();
        publisher
            .send_frame("event.heartbeat {\"ok\":true}".to_string())
            .await
            .unwrap();

        let received = subscriber.recv_frame().await.unwrap();
        assert_eq!(received.as_deref(), Some("event.heartbeat {\"ok\":true}"));
    }
}
