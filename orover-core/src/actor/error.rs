//! Actor lifecycle and dispatch failures.

// Layer 1: Standard library imports
use std::io;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::broker::BrokerError;
use crate::config::ConfigError;

/// Failures from actor initialization, dispatch registration and the run
/// loop.
#[derive(Debug, Error)]
pub enum ActorError {
    /// Configuration could not be loaded; fatal at startup (§7).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A publish or subscribe socket failed to connect or transport a frame.
    #[error(transparent)]
    Broker(#[from] BrokerError),

    /// A name passed to [`crate::actor::DispatchBuilder::register`] does not
    /// resolve to any identifier.
    #[error("unknown reason name: {0}")]
    UnknownReason(String),

    /// A name resolves to an identifier, but not one in `cmd ∪ state ∪ event`.
    #[error("{0} does not name a cmd, state or event identifier")]
    NotADispatchableReason(String),

    /// Another instance of this actor already holds the single-instance lock.
    #[error("another instance of {0} is already running")]
    AlreadyRunning(String),

    /// Lock-file creation failed for a reason other than "already locked".
    #[error("failed to acquire lock for {name}: {source}")]
    LockFailed {
        /// The actor name the lock is keyed on.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A handler returned an error (§7 "Handler-failure"); logged and the
    /// run loop continues.
    #[error("handler for {reason} failed: {message}")]
    HandlerFailed {
        /// The topic name of the reason being handled.
        reason: String,
        /// The handler's error message.
        message: String,
    },
}
