//! A [`tracing_subscriber::Layer`] that forwards every event to a
//! [`LogClient`], so an actor's ordinary `tracing::info!`/`warn!`/`error!`
//! calls become the log records §4.5's "attach a log handler" step
//! describes, without every call site touching the log client directly.

// Layer 2: Third-party crate imports
use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

// Layer 3: Internal module imports
use super::client::LogClient;
use super::record::{LogRecord, Severity};

/// Forwards every `tracing` event, regardless of target, to the log server
/// as a [`LogRecord`] tagged with this actor's name.
pub struct ForwardingLayer {
    logger: String,
    client: LogClient,
}

impl ForwardingLayer {
    /// Build a layer that tags every forwarded record with `logger` (the
    /// actor's derived name) and sends through `client`.
    pub fn new(logger: String, client: LogClient) -> Self {
        Self { logger, client }
    }
}

impl<S: Subscriber> Layer<S> for ForwardingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.client.send(LogRecord {
            logger: self.logger.clone(),
            level: Severity::from_tracing_level(event.metadata().level()),
            message: visitor.message,
            ts: Local::now(),
        });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else if self.message.is_empty() {
            self.message = format!("{}={:?}", field.name(), value);
        } else {
            self.message.push_str(&format!(" {}={:?}", field.name(), value));
        }
    }
}
