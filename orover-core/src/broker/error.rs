//! Event bus broker and client socket failures.

// Layer 1: Standard library imports
use std::io;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Failures from the broker proxy and its client-side publish/subscribe
/// sockets.
///
/// Per §7: bind failure is transport-fatal (the broker/actor exits); a
/// transient send or receive failure is transport-transient (the single
/// operation fails, the caller decides what to do next).
#[derive(Debug, Error)]
pub enum BrokerError {
    /// A bus endpoint URL was not a recognized `tcp://host:port` form.
    #[error("invalid bus endpoint {0:?}: expected tcp://host:port")]
    InvalidEndpoint(String),

    /// Binding a listening endpoint failed; fatal at startup.
    #[error("failed to bind {addr}: {source}")]
    BindFailed {
        /// The address that could not be bound.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Connecting to a peer endpoint failed.
    #[error("failed to connect to {addr}: {source}")]
    ConnectFailed {
        /// The address that could not be reached.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A single send did not complete before its configured timeout.
    #[error("send timed out")]
    SendTimeout,

    /// A single receive did not complete before its configured timeout.
    #[error("receive timed out")]
    ReceiveTimeout,

    /// The underlying connection failed or was closed.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
}
