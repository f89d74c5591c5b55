//! The handler contract a dispatch table entry implements (§4.5 "Dispatch").

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::context::ActorHandle;
use crate::message::Envelope;

/// A handler registered against one `cmd`/`state`/`event` reason.
///
/// The handler's return value is opaque to the framework: `Ok` is logged at
/// DEBUG, `Err` is logged at ERROR and the run loop continues with the next
/// frame (§7 "Handler-failure").
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handle one decoded, validated envelope.
    async fn handle(&self, envelope: Envelope, actor: ActorHandle) -> Result<String, String>;
}

/// Adapts a plain async closure into a [`Handler`], so call sites can
/// register `async fn`s directly instead of defining a struct per reason.
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Envelope, ActorHandle) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<String, String>> + Send,
{
    async fn handle(&self, envelope: Envelope, actor: ActorHandle) -> Result<String, String> {
        (self.0)(envelope, actor).await
    }
}
