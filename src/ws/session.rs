//! Per-connection WebSocket session actor and the `/ws` upgrade handler.
//!
//! The session stays thin: it parses inbound frames into commands and relays
//! them to its room coordinator; everything stateful lives in the room.

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::routes::valid_room_name;
use crate::ws::protocol::{ClientMsg, ServerMsg};
use crate::ws::registry::RoomRegistry;
use crate::ws::room::{Command, Connect, RoomActor, SessionClosed};

/// Outbound frame from the room to one session.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

/// Room-initiated close (rejects, `leave` acks, evictions).
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct CloseSession;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    room: Option<String>,
    id: Option<String>,
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<WsQuery>,
    registry: web::Data<RoomRegistry>,
) -> Result<HttpResponse, Error> {
    let room_name = query.room.as_deref().unwrap_or("").trim().to_string();
    let player_id = query.id.as_deref().unwrap_or("").trim().to_string();

    // Pre-handshake failures still complete the upgrade: the client gets an
    // error frame and a close, matching the rest of the protocol.
    if room_name.is_empty() {
        return ws::start(WsSession::rejected("Missing room"), &req, stream);
    }
    if !valid_room_name(&room_name) {
        return ws::start(WsSession::rejected("Invalid room name"), &req, stream);
    }
    if player_id.is_empty() {
        return ws::start(WsSession::rejected("Missing id"), &req, stream);
    }

    let room = match registry.into_inner().get_or_spawn(&room_name, false).await {
        Ok(Some(addr)) => addr,
        Ok(None) => return ws::start(WsSession::rejected("Room not found"), &req, stream),
        Err(err) => {
            warn!(room = %room_name, error = %err, "[WS] room lookup failed");
            return ws::start(WsSession::rejected("Room unavailable"), &req, stream);
        }
    };

    ws::start(WsSession::new(player_id, room), &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    player_id: String,
    room: Option<Addr<RoomActor>>,
    reject: Option<&'static str>,
}

impl WsSession {
    fn new(player_id: String, room: Addr<RoomActor>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            player_id,
            room: Some(room),
            reject: None,
        }
    }

    fn rejected(message: &'static str) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            player_id: String::new(),
            room: None,
            reject: Some(message),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        if let Some(message) = self.reject {
            Self::send_json(
                ctx,
                &ServerMsg::Error {
                    message: message.to_string(),
                },
            );
            ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Policy)));
            ctx.stop();
            return;
        }

        info!(
            conn_id = %self.conn_id,
            player_id = %self.player_id,
            "[WS SESSION] started"
        );
        if let Some(room) = &self.room {
            room.do_send(Connect {
                player_id: self.player_id.clone(),
                addr: ctx.address(),
            });
        }
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        if self.reject.is_none() {
            if let Some(room) = &self.room {
                room.do_send(SessionClosed {
                    player_id: self.player_id.clone(),
                    addr: ctx.address(),
                });
            }
            info!(
                conn_id = %self.conn_id,
                player_id = %self.player_id,
                "[WS SESSION] stopped"
            );
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                match parsed {
                    Ok(cmd) => {
                        if let Some(room) = &self.room {
                            room.do_send(Command {
                                player_id: self.player_id.clone(),
                                msg: cmd,
                            });
                        }
                    }
                    Err(err) => {
                        Self::send_json(
                            ctx,
                            &ServerMsg::Error {
                                message: format!("Malformed message: {err}"),
                            },
                        );
                    }
                }
            }
            Ok(ws::Message::Ping(payload)) => ctx.pong(&payload),
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Binary(_)) => {
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        message: "Binary not supported".to_string(),
                    },
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    player_id = %self.player_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}

impl Handler<CloseSession> for WsSession {
    type Result = ();

    fn handle(&mut self, _msg: CloseSession, ctx: &mut Self::Context) -> Self::Result {
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
        ctx.stop();
    }
}
