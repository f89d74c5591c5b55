//! Log transport and log server failures.

// Layer 1: Standard library imports
use std::io;
use std::path::PathBuf;

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Failures from the framed log transport and the log server's own I/O.
/// None of these are fatal to an actor: a logging failure is dropped, never
/// propagated, so the fabric's own availability never depends on the log
/// server being reachable.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log server could not bind its listener; fatal at startup only
    /// for the log server binary itself.
    #[error("failed to bind log server on {addr}: {source}")]
    BindFailed {
        /// Address the log server tried to bind.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configured log file could not be opened for append.
    #[error("failed to open log file {path:?}: {source}")]
    LogFileUnavailable {
        /// Path the log server tried to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
