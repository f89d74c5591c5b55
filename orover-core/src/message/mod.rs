//! The bus message envelope (§3) and its error type.

pub mod envelope;
pub mod error;

pub use envelope::{BodyInput, Envelope};
pub use error::EnvelopeError;
