//! Persistence adapter: one self-describing JSON blob per room.
//!
//! The blob is replaced wholesale on every save (read-modify-write); the
//! per-room actor serializes mutations, so no file locking is needed.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::state::GameRoom;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct RoomStore {
    dir: PathBuf,
}

impl RoomStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Blob path for a room; anything but alphanumerics, `-` and `_` in the
    /// name is flattened to `_`.
    fn path(&self, name: &str) -> PathBuf {
        let safe: String = name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    /// Load a room blob. An absent file means no such room; an empty or
    /// unparseable file is treated as a fresh room of that name.
    pub async fn load(&self, name: &str) -> Result<Option<GameRoom>, AppError> {
        let path = self.path(name);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        if raw.trim().is_empty() {
            info!(room = name, "Room blob empty; treating as new room");
            return Ok(Some(GameRoom::new(name)));
        }
        match serde_json::from_str::<GameRoom>(&raw) {
            Ok(room) => {
                info!(
                    room = name,
                    players = room.players.len(),
                    has_game = room.current_game.is_some(),
                    "Room loaded"
                );
                Ok(Some(room))
            }
            Err(err) => {
                info!(room = name, error = %err, "Room blob unparseable; treating as new room");
                Ok(Some(GameRoom::new(name)))
            }
        }
    }

    pub async fn save(&self, room: &GameRoom) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path(&room.name);
        let blob = serde_json::to_vec_pretty(room)?;
        tokio::fs::write(&path, blob).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::Player;

    #[tokio::test]
    async fn missing_blob_is_no_room() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::new(dir.path());
        assert!(store.load("nowhere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::new(dir.path());

        let mut room = GameRoom::new("den");
        room.players.push(Player::new("id-1", "Alice"));
        room.spectator_preferences.insert("id-1".to_string(), false);
        room.dick_tagged_player_id = Some("id-1".to_string());
        room.dick_tagged_at = Some(123.5);
        store.save(&room).await.unwrap();

        let loaded = store.load("den").await.unwrap().unwrap();
        assert_eq!(loaded.name, "den");
        assert_eq!(loaded.players, room.players);
        assert_eq!(loaded.spectator_preferences, room.spectator_preferences);
        assert_eq!(loaded.dick_tagged_player_id, room.dick_tagged_player_id);
        assert_eq!(loaded.dick_tagged_at, room.dick_tagged_at);
    }

    #[tokio::test]
    async fn empty_or_garbage_blob_is_a_fresh_room() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::new(dir.path());

        tokio::fs::write(dir.path().join("empty.json"), "").await.unwrap();
        let room = store.load("empty").await.unwrap().unwrap();
        assert!(room.players.is_empty());

        tokio::fs::write(dir.path().join("bad.json"), "{not json").await.unwrap();
        let room = store.load("bad").await.unwrap().unwrap();
        assert_eq!(room.name, "bad");
        assert!(room.current_game.is_none());
    }

    #[tokio::test]
    async fn room_names_are_sanitized_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::new(dir.path());

        let room = GameRoom::new("week/end game");
        store.save(&room).await.unwrap();
        assert!(dir.path().join("week_end_game.json").exists());
    }
}
