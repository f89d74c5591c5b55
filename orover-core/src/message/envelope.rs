//! The canonical bus record (§3) and its four operations: Construct, Encode,
//! Decode, Validate.

// Layer 1: Standard library imports
#[cfg(unix)]
use std::ffi::OsString;

// Layer 2: Third-party crate imports
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// Layer 3: Internal module imports
use super::error::EnvelopeError;
use crate::ids;

/// Timestamp format mandated by §3: local time, microsecond precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// The canonical record carried by every message on the bus.
///
/// Field names deliberately mirror §3 of the data model rather than Rust
/// naming conventions (`me`, `ts`, `src`, `prio`) so the wire JSON needs no
/// translation layer between this struct and the envelopes other processes
/// on the bus produce and consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// UUIDv4 canonical form.
    pub id: String,
    /// Local timestamp, `YYYY-MM-DDTHH:MM:SS.ffffff`.
    pub ts: String,
    /// Publisher identity; member of `origin ∪ actuator ∪ controller`.
    pub src: i32,
    /// Publisher's actor/module name.
    pub me: String,
    /// Publisher's hostname.
    pub host: String,
    /// Priority; member of `priority`.
    pub prio: i32,
    /// What the message is about; member of `cmd ∪ state ∪ event`.
    pub reason: i32,
    /// Reason-specific payload, may be empty.
    pub body: Value,
}

impl Envelope {
    /// Construct and stamp a new envelope, validating `src`, `reason` and
    /// `priority` up front.
    ///
    /// `priority` defaults to `priority::normal` when omitted. `body` may be
    /// given as an already-decoded JSON value or as a string to be decoded;
    /// anything else is rejected.
    pub fn construct(
        src: i32,
        reason: i32,
        body: impl Into<BodyInput>,
        priority: Option<i32>,
        me: &str,
    ) -> Result<Self, EnvelopeError> {
        if !ids::is_valid_src(src) {
            return Err(EnvelopeError::InvalidSrc(src));
        }
        if !ids::is_valid_reason(reason) {
            return Err(EnvelopeError::InvalidReason(reason));
        }
        let prio = priority.unwrap_or(ids::priority::normal.value());
        if !ids::is_valid_priority(prio) {
            return Err(EnvelopeError::InvalidPriority(prio));
        }
        let body = match body.into() {
            BodyInput::Value(v) => v,
            BodyInput::Text(s) => {
                serde_json::from_str(&s).map_err(|_| EnvelopeError::InvalidBody(s.clone()))?
            }
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            ts: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            src,
            me: me.to_string(),
            host: local_hostname(),
            prio,
            reason,
            body,
        })
    }

    /// `"<topic> <json>"`, per §6's wire format.
    pub fn encode(&self) -> Result<String, EnvelopeError> {
        let topic = ids::name_of(self.reason);
        let payload = serde_json::to_string(self)
            .map_err(|e| EnvelopeError::MalformedPayload(e.to_string()))?;
        Ok(format!("{topic} {payload}"))
    }

    /// Split a wire frame on its first space and parse the remainder.
    /// Rejects frames without a separating space.
    pub fn decode(frame: &str) -> Result<(String, Self), EnvelopeError> {
        let (topic, payload) = frame.split_once(' ').ok_or(EnvelopeError::MalformedFrame)?;
        let envelope: Self = serde_json::from_str(payload)
            .map_err(|e| EnvelopeError::MalformedPayload(e.to_string()))?;
        Ok((topic.to_string(), envelope))
    }

    /// Consumer-side validation ahead of dispatch: required fields are
    /// already checked by the type system at decode time (serde rejects a
    /// missing field as `MalformedPayload`); this additionally checks `id`,
    /// `ts`, `src` and `prio` are well-formed. `reason` correctness is left
    /// to dispatch (an unknown reason simply has no handler, §4.2).
    pub fn validate(&self) -> Result<(), EnvelopeError> {
        let uuid =
            Uuid::parse_str(&self.id).map_err(|_| EnvelopeError::InvalidId(self.id.clone()))?;
        if uuid.get_version_num() != 4 {
            return Err(EnvelopeError::InvalidId(self.id.clone()));
        }
        chrono::NaiveDateTime::parse_from_str(&self.ts, TIMESTAMP_FORMAT)
            .map_err(|_| EnvelopeError::InvalidTimestamp(self.ts.clone()))?;
        if !ids::is_valid_src(self.src) {
            return Err(EnvelopeError::InvalidSrc(self.src));
        }
        if !ids::is_valid_priority(self.prio) {
            return Err(EnvelopeError::InvalidPriority(self.prio));
        }
        Ok(())
    }
}

/// Accepted inputs to [`Envelope::construct`]'s `body` parameter.
pub enum BodyInput {
    /// Already-decoded JSON.
    Value(Value),
    /// A string to be decoded as JSON.
    Text(String),
}

impl From<Value> for BodyInput {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<String> for BodyInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for BodyInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[cfg(unix)]
fn local_hostname() -> String {
    nix::unistd::gethostname()
        .unwrap_or_else(|_| OsString::from("unknown"))
        .to_string_lossy()
        .into_owned()
}

#[cfg(not(unix))]
fn local_hostname() -> String {
    std::env::var("COMPUTERNAME").unwrap_or_else(|_| "unknown".to_string())
}
