//! Envelope construction, decoding and validation failures.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Everything that can go wrong building, decoding or validating an
/// [`crate::message::Envelope`].
///
/// Per §7 of the error handling design, every variant here is recoverable
/// by the caller: a bad envelope is quarantined (dropped, logged), never a
/// reason to panic or abort the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// `src` is not a member of `origin ∪ actuator ∪ controller`.
    #[error("invalid src: {0} is not a known origin, actuator or controller")]
    InvalidSrc(i32),

    /// `reason` is not a member of `cmd ∪ state ∪ event`.
    #[error("invalid reason: {0} is not a known cmd, state or event")]
    InvalidReason(i32),

    /// `prio` is not a member of `priority`.
    #[error("invalid priority: {0} is not low, normal or high")]
    InvalidPriority(i32),

    /// `body` was given as a string that does not decode as JSON.
    #[error("body is not valid JSON: {0}")]
    InvalidBody(String),

    /// The wire frame had no space separating topic from payload.
    #[error("malformed frame: no topic/payload separator")]
    MalformedFrame,

    /// The payload half of the frame did not parse as the envelope shape.
    #[error("malformed envelope payload: {0}")]
    MalformedPayload(String),

    /// A required field was absent from a decoded envelope.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// `id` was not a canonical UUIDv4.
    #[error("invalid id: {0} is not a UUIDv4")]
    InvalidId(String),

    /// `ts` did not parse under the documented timestamp format.
    #[error("invalid timestamp: {0} does not match YYYY-MM-DDTHH:MM:SS.ffffff")]
    InvalidTimestamp(String),
}
