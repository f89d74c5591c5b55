//! Log transport (§4.7): a framed TCP client every actor uses to forward
//! structured records, and the receiving server's own accept/rotate/write
//! loop.
//!
//! # Modules
//!
//! - [`record`]: `LogRecord`, `Severity`
//! - [`error`]: `LoggingError`
//! - [`client`]: `LogClient`, the background-task forwarding handle
//! - [`layer`]: `ForwardingLayer`, a `tracing_subscriber::Layer` that turns
//!   ordinary `tracing` calls into forwarded records
//! - [`server`]: `BoundLogServer`, the log server's accept loop, file
//!   rotation and length-prefixed record framing

pub mod client;
pub mod error;
pub mod layer;
pub mod record;
pub mod server;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub use client::LogClient;
pub use error::LoggingError;
pub use layer::ForwardingLayer;
pub use record::{LogRecord, Severity};
pub use server::{BoundLogServer, LogServer, DEFAULT_LOG_PORT};

/// Wire up this process's global `tracing` subscriber to forward every
/// event to the log server at `log_server_addr`, as well as printing to
/// stdout (matching the original's `print()` calls alongside its socket
/// handler, §4.5 "attach a log handler").
///
/// Call exactly once, from a binary's `main`, before constructing an
/// [`crate::actor::ActorRuntime`] — `tracing`'s global subscriber can only
/// be installed once per process.
pub fn install_actor_logging(
    actor_name: impl Into<String>,
    log_server_addr: impl Into<String>,
    level: Severity,
) {
    let client = LogClient::connect_background(log_server_addr.into());
    let filter = EnvFilter::new(severity_filter(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(ForwardingLayer::new(actor_name.into(), client))
        .try_init();
}

fn severity_filter(level: Severity) -> &'static str {
    match level {
        Severity::Debug => "debug",
        Severity::Info => "info",
        Severity::Warning => "warn",
        Severity::Error | Severity::Critical => "error",
    }
}
