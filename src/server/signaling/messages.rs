use actix::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{PairRole, ParticipantId};

/// Kind tag for messages the engine forwards between paired participants.
///
/// The engine only ever dispatches on the kind; payloads stay opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayKind {
    Offer,
    Answer,
    IceCandidate,
    Chat,
    TypingStart,
    TypingStop,
}

/// Message client -> server.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    FindPartner,
    Offer { payload: Value },
    Answer { payload: Value },
    IceCandidate { payload: Value },
    Chat { message: String },
    TypingStart,
    TypingStop,
    Leave,
    Ping,
}

/// Message server -> client.
#[derive(Message, Serialize, Deserialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    Waiting,
    Paired {
        partner_id: ParticipantId,
        role: PairRole,
    },
    Offer {
        payload: Value,
        from: ParticipantId,
    },
    Answer {
        payload: Value,
        from: ParticipantId,
    },
    IceCandidate {
        payload: Value,
        from: ParticipantId,
    },
    Chat {
        message: String,
        from: ParticipantId,
    },
    TypingStart {
        from: ParticipantId,
    },
    TypingStop {
        from: ParticipantId,
    },
    PartnerLeft,
    Error {
        code: String,
        message: String,
    },
}

impl ServerWsMessage {
    /// Wrap a relayed payload in the outbound variant matching its kind.
    ///
    /// Typing events carry no payload on the wire; chat carries its text.
    pub fn relayed(kind: RelayKind, payload: Value, from: ParticipantId) -> Self {
        match kind {
            RelayKind::Offer => Self::Offer { payload, from },
            RelayKind::Answer => Self::Answer { payload, from },
            RelayKind::IceCandidate => Self::IceCandidate { payload, from },
            RelayKind::Chat => Self::Chat {
                message: payload.as_str().unwrap_or_default().to_string(),
                from,
            },
            RelayKind::TypingStart => Self::TypingStart { from },
            RelayKind::TypingStop => Self::TypingStop { from },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_message_envelope_format() {
        let msg: ClientWsMessage = serde_json::from_str(r#"{"action":"FindPartner"}"#).unwrap();
        assert!(matches!(msg, ClientWsMessage::FindPartner));

        let msg: ClientWsMessage =
            serde_json::from_str(r#"{"action":"Chat","data":{"message":"hi"}}"#).unwrap();
        match msg {
            ClientWsMessage::Chat { message } => assert_eq!(message, "hi"),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn offer_payload_survives_untouched() {
        let raw = r#"{"action":"Offer","data":{"payload":{"type":"offer","sdp":"v=0\r\n"}}}"#;
        let msg: ClientWsMessage = serde_json::from_str(raw).unwrap();
        let payload = match msg {
            ClientWsMessage::Offer { payload } => payload,
            other => panic!("unexpected message: {:?}", other),
        };
        assert_eq!(payload["sdp"], "v=0\r\n");
    }

    #[test]
    fn paired_serializes_role_lowercase() {
        let id = ParticipantId::new_v4();
        let text = serde_json::to_string(&ServerWsMessage::Paired {
            partner_id: id,
            role: PairRole::Offerer,
        })
        .unwrap();
        assert!(text.contains(r#""action":"Paired""#));
        assert!(text.contains(r#""role":"offerer""#));
    }
}
