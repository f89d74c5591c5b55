//! # orover-core — the oRover control-plane fabric
//!
//! This crate is the in-process fabric shared by every oRover actor: the
//! closed identifier taxonomy, the bus message envelope, the sectioned
//! configuration loader, the event bus broker and client sockets, the base
//! actor framework, and the log forwarding client. The supervisor and log
//! server binaries (`orover-supervisor`, `orover-logserver`) and the event
//! bus binary (`orover-eventbus`) are thin `main.rs` wrappers around the
//! types defined here; device- and UI-facing actors (the HTTP remote
//! interface, the ultrasonic sensor poller, the serial-bridge motor actor,
//! the GPIO power monitor) are external collaborators this crate only
//! defines the wire contract for.
//!
//! # Quick start: a minimal actor
//!
//! ```rust,ignore
//! use orover_core::actor::{ActorRuntime, DispatchBuilder, FnHandler};
//! use orover_core::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Config::resolve_path(None))?;
//!
//!     let dispatch = DispatchBuilder::new()
//!         .register("event.object_detected", FnHandler(|envelope, _actor| async move {
//!             Ok(format!("observed {}", envelope.body))
//!         }))?
//!         .build();
//!
//!     let runtime = ActorRuntime::initialize(&config, "boss.py", dispatch).await?;
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Module organization
//!
//! - [`ids`] — the eleven closed, range-partitioned identifier sets (§3)
//! - [`message`] — the bus envelope and its Construct/Encode/Decode/Validate
//!   operations (§3, §4.2)
//! - [`config`] — the sectioned INI configuration loader (§4.3)
//! - [`broker`] — the event bus proxy and the publish/subscribe client
//!   sockets (§4.4)
//! - [`actor`] — the base actor framework: lifecycle, dispatch, heartbeat,
//!   graceful shutdown (§4.5)
//! - [`logging`] — the framed log-forwarding client and `tracing` layer
//!   every actor attaches, and the log server's own receive/rotate logic
//!   (§4.7)
//!
//! # Design principles carried over from the fabric's re-architecture (§9)
//!
//! - **Explicit dispatch, not reflection.** [`actor::DispatchBuilder`] takes
//!   `(reason_name, handler)` pairs; nothing here scans method names at
//!   runtime. The `"<set>_<member>"` naming convention survives only as a
//!   convention for call sites to follow, never as a lookup key.
//! - **No global singletons.** Configuration, the log client and the bus
//!   sockets are all values threaded explicitly through
//!   [`actor::ActorRuntime::initialize`], never module statics.
//! - **Best-effort delivery, no retries.** [`broker::EventBusProxy`] drops
//!   frames for a lagging subscriber rather than buffering or retrying; an
//!   application that needs guaranteed delivery must acknowledge in-band.

pub mod actor;
pub mod broker;
pub mod config;
pub mod ids;
pub mod logging;
pub mod message;

pub use actor::{ActorError, ActorHandle, ActorRuntime, DispatchBuilder, DispatchTable, Handler};
pub use broker::{BrokerError, BusPublisher, BusSubscriber, EventBusProxy};
pub use config::{Config, ConfigError};
pub use ids::{set_of, value_of, SetTag};
pub use logging::{LogClient, LogRecord, Severity};
pub use message::{Envelope, EnvelopeError};
