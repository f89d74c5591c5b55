//! Supervisor failures.

// Layer 1: Standard library imports
use std::io;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use orover_core::config::ConfigError;

/// Failures from launching or terminating configured child processes.
///
/// Per §7, configuration errors here are fatal at startup (the supervisor
/// exits with a one-line diagnostic); a single child's spawn or signal
/// failure is logged and does not stop the supervisor from starting or
/// signaling the rest.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// `[scripts]` is missing or empty (§4.6).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A configured child process could not be spawned.
    #[error("failed to start process {name} ({command}): {source}")]
    SpawnFailed {
        /// The `[scripts]` key naming this process.
        name: String,
        /// The command line that failed to spawn.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
