//! The handle a running actor's dispatch handlers use to publish further
//! messages, superseding the teacher's generic `ActorContext<M: Message>`
//! Phase-1 placeholder with the concrete state an oRover actor needs.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use thiserror::Error;
use tokio::sync::Mutex;

// Layer 3: Internal module imports
use crate::broker::{BrokerError, BusPublisher};
use crate::message::{BodyInput, Envelope, EnvelopeError};

struct Shared {
    name: String,
    publisher: Mutex<BusPublisher>,
    running: AtomicBool,
}

/// Cheaply cloneable handle passed into every handler invocation (§4.5
/// "Publish"). Cloning shares the same underlying publish socket and
/// `running` flag as the actor runtime that created it.
#[derive(Clone)]
pub struct ActorHandle {
    shared: Arc<Shared>,
}

/// What went wrong publishing through an [`ActorHandle`].
#[derive(Debug, Error)]
pub enum PublishError {
    /// The envelope's own fields were invalid.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    /// The transport failed or timed out.
    #[error(transparent)]
    Broker(#[from] BrokerError),
}

impl ActorHandle {
    pub(super) fn new(name: String, publisher: BusPublisher) -> Self {
        Self {
            shared: Arc::new(Shared {
                name,
                publisher: Mutex::new(publisher),
                running: AtomicBool::new(true),
            }),
        }
    }

    /// This actor's derived name (§4.3 `derive_actor_name`).
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Whether the run loop should keep processing frames.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Relaxed)
    }

    pub(super) fn stop(&self) {
        self.shared.running.store(false, Ordering::Relaxed);
    }

    /// Construct, encode and send an envelope (§4.5 "Publish"). Never
    /// panics; validation and transport failures are both reported as
    /// `Err`, matching the framework's "never throws" contract at the
    /// call site that decides whether to log and continue.
    pub async fn publish(
        &self,
        src: i32,
        reason: i32,
        body: impl Into<BodyInput>,
        priority: Option<i32>,
    ) -> Result<(), PublishError> {
        let envelope = Envelope::construct(src, reason, body, priority, &self.shared.name)
            .map_err(PublishError::Envelope)?;
        let frame = envelope.encode().map_err(PublishError::Envelope)?;
        let mut publisher = self.shared.publisher.lock().await;
        publisher.send_frame(frame).await.map_err(PublishError::Broker)
    }
}
