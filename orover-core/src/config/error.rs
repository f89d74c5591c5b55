//! Configuration loading failures.
//!
//! Per §7, configuration errors are the one class of error allowed to
//! terminate the process: they are reported with a one-line diagnostic and
//! the caller exits, rather than being quarantined like bus traffic.

// Layer 1: Standard library imports
use std::path::PathBuf;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Configuration load/parse failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `--config` nor the default `config.ini` resolved to a file.
    #[error("configuration file {0:?} does not exist")]
    FileNotFound(PathBuf),

    /// The file exists but is not valid INI.
    #[error("failed to parse {path:?}: {source}")]
    ParseFailed {
        /// The file that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: ini::Error,
    },

    /// The `[scripts]` section required by the supervisor is absent.
    #[error("config does not have a section [scripts] with defined processes")]
    MissingScripts,

    /// The `[scripts]` section is present but names no processes.
    #[error("config does not have any processes defined in the [scripts] section")]
    EmptyScripts,
}
