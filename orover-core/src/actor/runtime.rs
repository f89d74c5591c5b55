//! The actor run loop (§4.5): Initialize, Run, Heartbeat task, Terminate.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use serde_json::json;
use tracing::{debug, error, info, warn};

// Layer 3: Internal module imports
use super::context::ActorHandle;
use super::dispatch::DispatchTable;
use super::error::ActorError;
use super::lock::ActorLock;
use crate::broker::{BusPublisher, BusSubscriber, DEFAULT_TRANSPORT_TIMEOUT};
use crate::config::Config;
use crate::ids;
use crate::message::Envelope;

/// A running actor: its name, sockets, dispatch table and heartbeat
/// interval, built once by [`ActorRuntime::initialize`] and driven to
/// completion by [`ActorRuntime::run`].
pub struct ActorRuntime {
    name: String,
    subscriber: BusSubscriber,
    dispatch: DispatchTable,
    heartbeat_interval: Duration,
    handle: ActorHandle,
    _lock: ActorLock,
}

impl ActorRuntime {
    /// Initialize per §4.5: load configuration, derive the actor name,
    /// acquire the single-instance lock, connect both sockets, and leave
    /// the heartbeat task and signal handler to [`Self::run`].
    ///
    /// The log handler step of §4.5 is the caller's responsibility, via
    /// [`crate::logging::install_actor_logging`], called once from `main`
    /// before this function (installing `tracing`'s global subscriber here
    /// would make it impossible to call `initialize` more than once per
    /// process, which the framework's own tests need to do).
    pub async fn initialize(
        config: &Config,
        invoked_command: &str,
        dispatch: DispatchTable,
    ) -> Result<Self, ActorError> {
        let name = config.derive_actor_name(invoked_command);
        let lock = ActorLock::acquire(&std::env::temp_dir(), &name)?;

        let send_timeout = Duration::from_millis(
            config.get_i64("orover", "send_timeout", DEFAULT_TRANSPORT_TIMEOUT.as_millis() as i64) as u64,
        );
        let receive_timeout = Duration::from_millis(
            config.get_i64(
                "orover",
                "receive_timeout",
                DEFAULT_TRANSPORT_TIMEOUT.as_millis() as i64,
            ) as u64,
        );
        let heartbeat_interval = Duration::from_secs(
            config.get_i64("orover", "heartbeat_interval", 0).max(0) as u64,
        );

        let pub_endpoint = config.get_string("eventbus", "client_pub_socket", "tcp://localhost:5556");
        let sub_endpoint = config.get_string("eventbus", "client_sub_socket", "tcp://localhost:5555");

        let publisher = BusPublisher::connect(&pub_endpoint)
            .await?
            .with_send_timeout(send_timeout);
        let subscriber = BusSubscriber::connect(&sub_endpoint, "")
            .await?
            .with_receive_timeout(receive_timeout);

        info!(actor = %name, %pub_endpoint, %sub_endpoint, "actor initialized");

        Ok(Self {
            handle: ActorHandle::new(name.clone(), publisher),
            name,
            subscriber,
            dispatch,
            heartbeat_interval,
            _lock: lock,
        })
    }

    /// A handle bound to this actor's publish socket, for use outside the
    /// dispatch table (e.g. an initial startup announcement).
    pub fn handle(&self) -> ActorHandle {
        self.handle.clone()
    }

    /// Run the receive loop until a termination signal arrives. Heartbeats
    /// (if enabled) run concurrently on their own task.
    pub async fn run(mut self) -> Result<(), ActorError> {
        if !self.heartbeat_interval.is_zero() {
            tokio::spawn(heartbeat_task(self.handle.clone(), self.heartbeat_interval));
        }

        #[cfg(unix)]
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .map_err(|source| ActorError::LockFailed {
                name: self.name.clone(),
                source,
            })?;

        loop {
            if !self.handle.is_running() {
                break;
            }
            tokio::select! {
                #[cfg(unix)]
                _ = sigterm.recv() => {
                    info!(actor = %self.name, "termination signal received");
                    self.handle.stop();
                    break;
                }
                _ = tokio::signal::ctrl_c() => {
                    info!(actor = %self.name, "interrupt received");
                    self.handle.stop();
                    break;
                }
                frame = self.subscriber.recv_frame() => {
                    match frame {
                        Ok(Some(line)) => self.dispatch_frame(&line).await,
                        Ok(None) => {
                            warn!(actor = %self.name, "subscribe socket closed");
                            break;
                        }
                        Err(_) => continue,
                    }
                }
            }
        }
        Ok(())
    }

    async fn dispatch_frame(&self, frame: &str) {
        let (topic, envelope) = match Envelope::decode(frame) {
            Ok(pair) => pair,
            Err(e) => {
                warn!(actor = %self.name, error = %e, "malformed frame, dropped");
                return;
            }
        };
        if !self.dispatch.knows_topic(&topic) {
            warn!(actor = %self.name, %topic, "no handler registered for topic, dropped");
            return;
        }
        if let Err(e) = envelope.validate() {
            warn!(actor = %self.name, %topic, error = %e, "envelope failed validation, dropped");
            return;
        }
        let Some(handler) = self.dispatch.get(envelope.reason) else {
            return;
        };
        match handler.handle(envelope, self.handle.clone()).await {
            Ok(outcome) => debug!(actor = %self.name, %topic, %outcome, "handler completed"),
            Err(message) => {
                let err = ActorError::HandlerFailed {
                    reason: topic.clone(),
                    message,
                };
                error!(actor = %self.name, %topic, error = %err, "handler failed");
            }
        }
    }
}

async fn heartbeat_task(handle: ActorHandle, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    while handle.is_running() {
        ticker.tick().await;
        if !handle.is_running() {
            break;
        }
        let _ = handle
            .publish(
                ids::origin::heartbeat_source.value(),
                ids::event::heartbeat.value(),
                json!({ "script": handle.name() }),
                None,
            )
            .await;
    }
}
