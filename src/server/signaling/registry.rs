//! Connection registry: bookkeeping for currently connected participants.
//!
//! Pure map from participant id to session handle, no business logic. The
//! handle type is generic so the engine can be exercised in tests without a
//! running actor system.

use std::collections::HashMap;

use super::types::ParticipantId;

/// The set of live participants and their session handles.
pub struct ConnectionRegistry<S> {
    sessions: HashMap<ParticipantId, S>,
}

impl<S> ConnectionRegistry<S> {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Add a newly connected participant.
    ///
    /// Idempotent: registering the same id twice keeps the latest handle and
    /// does not corrupt state.
    pub fn register(&mut self, id: ParticipantId, handle: S) {
        self.sessions.insert(id, handle);
    }

    /// Remove a participant on disconnect.
    ///
    /// Safe on an unknown id, since disconnect notifications can race with
    /// other cleanup.
    pub fn unregister(&mut self, id: &ParticipantId) -> Option<S> {
        self.sessions.remove(id)
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&S> {
        self.sessions.get(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

impl<S> Default for ConnectionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut registry = ConnectionRegistry::new();
        let id = ParticipantId::new_v4();
        registry.register(id, "a");
        registry.register(id, "b");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&id), Some(&"b"));
    }

    #[test]
    fn unregister_unknown_is_noop() {
        let mut registry: ConnectionRegistry<()> = ConnectionRegistry::new();
        assert!(registry.unregister(&ParticipantId::new_v4()).is_none());
        assert_eq!(registry.len(), 0);
    }
}
