use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of one connected participant.
///
/// Assigned by the transport layer when the WebSocket is accepted; never
/// chosen by the client. Identity alone is sufficient to route messages.
pub type ParticipantId = Uuid;

/// Role assigned to each side of a pairing.
///
/// The participant whose request triggered the match (arrived second) is
/// always the offerer; the one that was waiting is always the answerer.
/// Fixed by convention so both endpoints agree on who initiates WebRTC
/// negotiation without further coordination.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PairRole {
    Offerer,
    Answerer,
}
