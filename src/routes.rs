//! HTTP surface: the lobby join endpoint and the WebSocket upgrade.
//! Static assets and the room HTML handoff live outside this crate.

use actix_web::{web, HttpResponse};
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::ws::registry::RoomRegistry;
use crate::ws::room::Join;
use crate::ws::session;

const MAX_PLAYER_NAME_LEN: usize = 20;

pub fn valid_room_name(name: &str) -> bool {
    regex_is_match!(r"^[a-z0-9_-]{1,20}$", name)
}

#[derive(Debug, Deserialize)]
struct JoinQuery {
    room: Option<String>,
    name: Option<String>,
}

#[derive(Serialize)]
struct JoinResponse {
    id: String,
}

/// `GET /join?room=<name>&name=<player_name>` — create the room if absent
/// and resolve the player name to an id (stable across rejoins).
async fn join(
    query: web::Query<JoinQuery>,
    registry: web::Data<RoomRegistry>,
) -> Result<HttpResponse, AppError> {
    let room_name = query.room.as_deref().unwrap_or("").trim().to_string();
    if room_name.is_empty() {
        return Err(AppError::bad_request("Missing room"));
    }
    if !valid_room_name(&room_name) {
        return Err(AppError::bad_request("Invalid room name"));
    }

    let mut player_name: String = query
        .name
        .as_deref()
        .unwrap_or("")
        .trim()
        .chars()
        .take(MAX_PLAYER_NAME_LEN)
        .collect();
    if player_name.is_empty() {
        player_name = "Player".to_string();
    }

    let room = registry
        .into_inner()
        .get_or_spawn(&room_name, true)
        .await?
        .ok_or_else(|| AppError::not_found("Room not found"))?;

    let id = room
        .send(Join { player_name })
        .await
        .map_err(|err| AppError::internal(format!("room mailbox closed: {err}")))?;

    info!(room = %room_name, "Join resolved");
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store"))
        .json(JoinResponse { id }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/join").route(web::get().to(join)))
        .service(web::resource("/ws").route(web::get().to(session::upgrade)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_names_are_lowercase_bounded() {
        assert!(valid_room_name("den"));
        assert!(valid_room_name("friday-night_42"));
        assert!(!valid_room_name(""));
        assert!(!valid_room_name("Den"));
        assert!(!valid_room_name("room with spaces"));
        assert!(!valid_room_name("a".repeat(21).as_str()));
        assert!(!valid_room_name("ünïcode"));
    }
}
