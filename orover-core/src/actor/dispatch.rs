//! Explicit dispatch-table registration (§9 REDESIGN FLAGS): the Python
//! original discovers `event_<member>`/`cmd_<member>` methods on itself by
//! reflection at startup. An actor here instead builds its table with an
//! explicit list of `(reason, handler)` pairs; `"<set>_<member>"` survives
//! only as the naming convention call sites are encouraged to use for the
//! async functions they register, never as a runtime lookup key.

// Layer 1: Standard library imports
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// Layer 3: Internal module imports
use super::error::ActorError;
use super::handler::Handler;
use crate::ids;

/// The built, immutable table an [`super::runtime::ActorRuntime`] dispatches
/// incoming frames against.
pub struct DispatchTable {
    handlers: HashMap<i32, Arc<dyn Handler>>,
    known_topics: HashSet<String>,
}

impl DispatchTable {
    /// The handler registered for `reason`, if any.
    pub fn get(&self, reason: i32) -> Option<&Arc<dyn Handler>> {
        self.handlers.get(&reason)
    }

    /// Whether `topic` names a reason this actor has a handler for. Frames
    /// for topics outside this set are dropped at DEBUG without decoding
    /// further (§4.5 "known topics").
    pub fn knows_topic(&self, topic: &str) -> bool {
        self.known_topics.contains(topic)
    }
}

/// Builds a [`DispatchTable`] one registration at a time.
#[derive(Default)]
pub struct DispatchBuilder {
    handlers: HashMap<i32, Arc<dyn Handler>>,
    known_topics: HashSet<String>,
}

impl DispatchBuilder {
    /// Start an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` against `reason_name`, e.g. `"event.object_detected"`
    /// or the bare member name `"object_detected"`. Fails if the name does
    /// not resolve, or resolves outside `cmd ∪ state ∪ event`.
    pub fn register(
        mut self,
        reason_name: &str,
        handler: impl Handler + 'static,
    ) -> Result<Self, ActorError> {
        let value = ids::value_of(reason_name)
            .ok_or_else(|| ActorError::UnknownReason(reason_name.to_string()))?;
        if !ids::is_valid_reason(value) {
            return Err(ActorError::NotADispatchableReason(reason_name.to_string()));
        }
        self.known_topics.insert(ids::name_of(value));
        self.handlers.insert(value, Arc::new(handler));
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> DispatchTable {
        DispatchTable {
            handlers: self.handlers,
            known_topics: self.known_topics,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use super::super::handler::FnHandler;

    #[test]
    fn register_resolves_qualified_and_bare_names() {
        let built = DispatchBuilder::new()
            .register("event.heartbeat", FnHandler(|_, _| async { Ok(String::new()) }))
            .unwrap()
            .build();
        assert!(built.knows_topic("event.heartbeat"));
        assert!(built.get(ids::value_of("event.heartbeat").unwrap()).is_some());
    }

    #[test]
    fn register_rejects_non_dispatchable_set() {
        let err = DispatchBuilder::new().register("origin.heartbeat_source", FnHandler(|_, _| async { Ok(String::new()) }));
        assert!(matches!(err, Err(ActorError::NotADispatchableReason(_))));
    }

    #[test]
    fn register_rejects_unknown_name() {
        let err = DispatchBuilder::new().register("event.not_a_thing", FnHandler(|_, _| async { Ok(String::new()) }));
        assert!(matches!(err, Err(ActorError::UnknownReason(_))));
    }
}
