/// WebSocket session handler for one participant.
///
/// This actor manages a single participant's connection, registering it with
/// the signaling server on start, reporting the disconnect on stop, and
/// relaying parsed client messages to the server actor. Outbound server
/// messages are serialized to JSON text frames.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use super::messages::{ClientWsMessage, RelayKind, ServerWsMessage};
use super::server::{Connect, Disconnect, FindPartner, LeaveChat, Relay, SignalingServer};
use super::types::ParticipantId;
use crate::server::ws_error::ws_error_message;

/// One participant's WebSocket session.
pub struct WsSession {
    pub id: ParticipantId,
    pub server_addr: Addr<SignalingServer>,
}

impl WsSession {
    fn relay(&self, kind: RelayKind, payload: serde_json::Value) {
        self.server_addr.do_send(Relay {
            id: self.id,
            kind,
            payload,
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the participant.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.server_addr.do_send(Connect {
            id: self.id,
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the session stops. Triggers teardown on the server.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.server_addr.do_send(Disconnect { id: self.id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(ClientWsMessage::FindPartner) => {
                        self.server_addr.do_send(FindPartner { id: self.id });
                    }
                    Ok(ClientWsMessage::Offer { payload }) => {
                        self.relay(RelayKind::Offer, payload);
                    }
                    Ok(ClientWsMessage::Answer { payload }) => {
                        self.relay(RelayKind::Answer, payload);
                    }
                    Ok(ClientWsMessage::IceCandidate { payload }) => {
                        self.relay(RelayKind::IceCandidate, payload);
                    }
                    Ok(ClientWsMessage::Chat { message }) => {
                        self.relay(RelayKind::Chat, serde_json::Value::String(message));
                    }
                    Ok(ClientWsMessage::TypingStart) => {
                        self.relay(RelayKind::TypingStart, serde_json::Value::Null);
                    }
                    Ok(ClientWsMessage::TypingStop) => {
                        self.relay(RelayKind::TypingStop, serde_json::Value::Null);
                    }
                    Ok(ClientWsMessage::Leave) => {
                        self.server_addr.do_send(LeaveChat { id: self.id });
                    }
                    Ok(ClientWsMessage::Ping) => {
                        // Keepalive; nothing to do.
                    }
                    Err(_e) => {
                        ctx.text(ws_error_message(
                            "INVALID_MESSAGE",
                            "Invalid client message",
                            None,
                        ));
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for WsSession {
    type Result = ();

    /// Handles messages sent from the server to this session.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                log::error!("Failed to serialize ServerWsMessage: {}", e);
                ctx.text(ws_error_message(
                    "INTERNAL_ERROR",
                    "Internal server error",
                    None,
                ));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for the signaling relay.
///
/// The participant id is assigned here, at accept time; clients never pick
/// their own identity.
pub async fn ws_signaling(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        WsSession {
            id: ParticipantId::new_v4(),
            server_addr: data.signaling_addr.clone(),
        },
        &req,
        stream,
    )
}
