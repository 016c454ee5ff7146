//! Matchmaking and relay engine.
//!
//! Owns the waiting queue and the pairing table and is the only component
//! that mutates them. Every operation is a synchronous transition over this
//! state; callers (the `SignalingServer` actor) serialize access and deliver
//! the returned notifications. Invariants:
//! - a participant appears at most once in the waiting queue;
//! - pairings are symmetric and exclusive (at most one partner);
//! - a participant is never both queued and paired.

use std::collections::{HashMap, VecDeque};

use log::{debug, info};

use super::messages::{RelayKind, ServerWsMessage};
use super::registry::ConnectionRegistry;
use super::types::{PairRole, ParticipantId};

/// An outbound event addressed to a single participant.
///
/// The engine never delivers anything itself; it hands these back to the
/// actor layer, which resolves ids to session handles.
#[derive(Debug)]
pub struct Notification {
    pub to: ParticipantId,
    pub message: ServerWsMessage,
}

impl Notification {
    fn new(to: ParticipantId, message: ServerWsMessage) -> Self {
        Self { to, message }
    }
}

pub struct PairingEngine<S> {
    registry: ConnectionRegistry<S>,
    /// Participants waiting to be matched, front = highest priority.
    waiting: VecDeque<ParticipantId>,
    /// Symmetric partner map: if a -> b then b -> a.
    pairings: HashMap<ParticipantId, ParticipantId>,
}

impl<S> PairingEngine<S> {
    pub fn new() -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            waiting: VecDeque::new(),
            pairings: HashMap::new(),
        }
    }

    /// Session handle for a participant, if still connected.
    pub fn session(&self, id: &ParticipantId) -> Option<&S> {
        self.registry.get(id)
    }

    pub fn partner_of(&self, id: &ParticipantId) -> Option<ParticipantId> {
        self.pairings.get(id).copied()
    }

    pub fn is_waiting(&self, id: &ParticipantId) -> bool {
        self.waiting.contains(id)
    }

    /// Register a newly connected participant.
    pub fn connect(&mut self, id: ParticipantId, handle: S) {
        self.registry.register(id, handle);
        info!(
            "[Signaling] Participant {} connected ({} online)",
            id,
            self.registry.len()
        );
    }

    /// Match `id` against the waiting queue, or enqueue it.
    ///
    /// A repeated request from a participant already waiting restarts the
    /// search rather than erroring: its stale queue entry is removed first.
    pub fn request_pairing(&mut self, id: ParticipantId) -> Vec<Notification> {
        if !self.registry.contains(&id) {
            debug!("[Signaling] Pairing request from unknown participant {}", id);
            return Vec::new();
        }

        // Duplicate request: drop the stale entry and search again.
        if let Some(pos) = self.waiting.iter().position(|w| *w == id) {
            self.waiting.remove(pos);
            debug!(
                "[Signaling] Removed {} from waiting queue (duplicate request)",
                id
            );
        }

        // Pop from the front until a distinct partner turns up; entries equal
        // to the requester are discarded to rule out a self-match.
        let mut partner = None;
        while let Some(candidate) = self.waiting.pop_front() {
            if candidate != id {
                partner = Some(candidate);
                break;
            }
            debug!("[Signaling] Skipped self-match for {}", id);
        }

        match partner {
            Some(q) => {
                self.pairings.insert(id, q);
                self.pairings.insert(q, id);
                info!("[Signaling] Matched {} (offerer) with {} (answerer)", id, q);
                vec![
                    Notification::new(
                        id,
                        ServerWsMessage::Paired {
                            partner_id: q,
                            role: PairRole::Offerer,
                        },
                    ),
                    Notification::new(
                        q,
                        ServerWsMessage::Paired {
                            partner_id: id,
                            role: PairRole::Answerer,
                        },
                    ),
                ]
            }
            None => {
                self.waiting.push_back(id);
                debug!("[Signaling] {} added to waiting queue", id);
                vec![Notification::new(id, ServerWsMessage::Waiting)]
            }
        }
    }

    /// Forward an opaque message to `from`'s current partner.
    ///
    /// Best-effort, at-most-once: with no partner on record (pairing not yet
    /// established, already torn down, or out-of-order arrival) the message
    /// is silently dropped.
    pub fn relay(
        &mut self,
        from: ParticipantId,
        kind: RelayKind,
        payload: serde_json::Value,
    ) -> Vec<Notification> {
        match self.pairings.get(&from) {
            Some(partner) => vec![Notification::new(
                *partner,
                ServerWsMessage::relayed(kind, payload, from),
            )],
            None => {
                debug!("[Signaling] Dropped {:?} from unpaired {}", kind, from);
                Vec::new()
            }
        }
    }

    /// Voluntary end of the current pairing; the participant stays
    /// registered and may immediately request a new partner.
    pub fn leave(&mut self, id: ParticipantId) -> Vec<Notification> {
        self.teardown(id)
    }

    /// Transport-level disconnect: teardown plus unregistration.
    pub fn disconnect(&mut self, id: ParticipantId) -> Vec<Notification> {
        let notifications = self.teardown(id);
        if self.registry.unregister(&id).is_some() {
            info!(
                "[Signaling] Participant {} disconnected ({} online)",
                id,
                self.registry.len()
            );
        }
        notifications
    }

    /// Shared teardown for `leave` and disconnect.
    ///
    /// Afterwards `id` holds no partner and is not queued. Partnered and
    /// queued states are mutually exclusive but both are checked, since
    /// teardown must also recover from any upstream race.
    fn teardown(&mut self, id: ParticipantId) -> Vec<Notification> {
        let mut notifications = Vec::new();

        if let Some(partner) = self.pairings.remove(&id) {
            self.pairings.remove(&partner);
            notifications.push(Notification::new(partner, ServerWsMessage::PartnerLeft));
            info!("[Signaling] Pairing {} <-> {} torn down", id, partner);
        }

        if let Some(pos) = self.waiting.iter().position(|w| *w == id) {
            self.waiting.remove(pos);
            debug!("[Signaling] Removed {} from waiting queue", id);
        }

        notifications
    }

    /// Force entries into the waiting queue, bypassing matching.
    ///
    /// Lets tests reproduce the defensive multi-entry states the scan in
    /// `request_pairing` guards against; immediate matching never produces
    /// them through the public operations.
    #[cfg(test)]
    fn seed_waiting(&mut self, ids: &[ParticipantId]) {
        self.waiting.extend(ids.iter().copied());
    }
}

impl<S> Default for PairingEngine<S> {
    fn default() -> Self {
        Self::new()
    }
}
