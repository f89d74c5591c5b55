//! The actor framework (§4.5): base behavior every oRover process shares —
//! startup, publish socket, subscribe socket, heartbeat, dispatch table,
//! graceful shutdown.
//!
//! Unlike the teacher's in-process `Actor` trait generic over a typed
//! `Message` and a `MessageBroker<M>`, an oRover actor is an independent OS
//! process that speaks the wire envelope format over TCP (§4.2, §4.4); there
//! is nothing here to implement per actor beyond building a
//! [`dispatch::DispatchTable`] and calling [`runtime::ActorRuntime::initialize`].
//!
//! # Modules
//!
//! - [`error`]: `ActorError`
//! - [`lock`]: single-instance lock, superseding the original's stub
//! - [`handler`]: the `Handler` trait a dispatch entry implements
//! - [`dispatch`]: explicit `(reason, handler)` registration (§9)
//! - [`context`]: `ActorHandle`, the publish-capable handle passed to handlers
//! - [`runtime`]: `ActorRuntime`, the Initialize/Run/Heartbeat/Terminate loop

pub mod context;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod lock;
pub mod runtime;

pub use context::{ActorHandle, PublishError};
pub use dispatch::{DispatchBuilder, DispatchTable};
pub use error::ActorError;
pub use handler::{FnHandler, Handler};
pub use lock::ActorLock;
pub use runtime::ActorRuntime;
