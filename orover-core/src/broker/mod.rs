//! The event bus broker (§4.4) and the client sockets every actor connects
//! with (§4.5).
//!
//! # Modules
//!
//! - [`error`]: `BrokerError`, transport-transient and transport-fatal per §7
//! - [`endpoint`]: `tcp://host:port` config string → socket address
//! - [`proxy`]: `EventBusProxy`, the XSUB↔XPUB-style relay process
//! - [`client`]: `BusPublisher`/`BusSubscriber`, the client-facing sockets

pub mod client;
pub mod endpoint;
pub mod error;
pub mod proxy;

pub use client::{BusPublisher, BusSubscriber, DEFAULT_TRANSPORT_TIMEOUT};
pub use error::BrokerError;
pub use proxy::EventBusProxy;
