/// Signaling server actor.
///
/// The single mutual-exclusion boundary around the matchmaking/relay state:
/// every inbound participant event is an actor message, so the engine's
/// queue and pairing table are only ever touched by one handler at a time.
/// Handlers run the engine transition, then fan the returned notifications
/// out to the addressed sessions.
use actix::prelude::*;
use serde_json::Value;

use super::engine::{Notification, PairingEngine};
use super::messages::{RelayKind, ServerWsMessage};
use super::types::ParticipantId;

type SessionRecipient = Recipient<ServerWsMessage>;

/// Main signaling server actor.
pub struct SignalingServer {
    engine: PairingEngine<SessionRecipient>,
}

impl SignalingServer {
    /// Create a new signaling server with no participants.
    pub fn new() -> Self {
        Self {
            engine: PairingEngine::new(),
        }
    }

    /// Deliver engine notifications to their target sessions.
    ///
    /// A target that disconnected between the transition and delivery is
    /// skipped; the message is best-effort by design.
    fn dispatch(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            if let Some(recipient) = self.engine.session(&notification.to) {
                recipient.do_send(notification.message);
            }
        }
    }
}

impl Default for SignalingServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Message: a participant's WebSocket was accepted.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: ParticipantId,
    pub addr: SessionRecipient,
}

/// Message: a participant's WebSocket closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: ParticipantId,
}

/// Message: participant wants to be matched with a stranger.
#[derive(Message)]
#[rtype(result = "()")]
pub struct FindPartner {
    pub id: ParticipantId,
}

/// Message: opaque payload to forward to the participant's partner.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Relay {
    pub id: ParticipantId,
    pub kind: RelayKind,
    pub payload: Value,
}

/// Message: participant ends the current pairing but stays connected.
#[derive(Message)]
#[rtype(result = "()")]
pub struct LeaveChat {
    pub id: ParticipantId,
}

impl Actor for SignalingServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.engine.connect(msg.id, msg.addr);
    }
}

impl Handler<Disconnect> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        let notifications = self.engine.disconnect(msg.id);
        self.dispatch(notifications);
    }
}

impl Handler<FindPartner> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: FindPartner, _ctx: &mut Self::Context) -> Self::Result {
        let notifications = self.engine.request_pairing(msg.id);
        self.dispatch(notifications);
    }
}

impl Handler<Relay> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: Relay, _ctx: &mut Self::Context) -> Self::Result {
        let notifications = self.engine.relay(msg.id, msg.kind, msg.payload);
        self.dispatch(notifications);
    }
}

impl Handler<LeaveChat> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: LeaveChat, _ctx: &mut Self::Context) -> Self::Result {
        let notifications = self.engine.leave(msg.id);
        self.dispatch(notifications);
    }
}
