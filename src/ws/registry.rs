//! In-memory rooms map: room name -> live coordinator actor.

use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use tracing::info;

use crate::domain::state::GameRoom;
use crate::error::AppError;
use crate::store::RoomStore;
use crate::ws::room::RoomActor;

pub struct RoomRegistry {
    rooms: DashMap<String, Addr<RoomActor>>,
    store: RoomStore,
    // Serializes the load-and-spawn path so concurrent joins to a new room
    // cannot start two actors for it.
    spawn_lock: tokio::sync::Mutex<()>,
}

impl RoomRegistry {
    pub fn new(store: RoomStore) -> Arc<Self> {
        Arc::new(Self {
            rooms: DashMap::new(),
            store,
            spawn_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn store(&self) -> &RoomStore {
        &self.store
    }

    /// Resolve the coordinator for `name`, spawning it from the persisted
    /// blob on a miss. With `create_if_missing` an absent blob yields a fresh
    /// room (the `/join` path); otherwise `None` (the `/ws` path).
    pub async fn get_or_spawn(
        self: &Arc<Self>,
        name: &str,
        create_if_missing: bool,
    ) -> Result<Option<Addr<RoomActor>>, AppError> {
        if let Some(entry) = self.rooms.get(name) {
            if entry.value().connected() {
                return Ok(Some(entry.value().clone()));
            }
        }

        let _guard = self.spawn_lock.lock().await;
        if let Some(entry) = self.rooms.get(name) {
            if entry.value().connected() {
                return Ok(Some(entry.value().clone()));
            }
        }

        let room = match self.store.load(name).await? {
            Some(room) => room,
            None if create_if_missing => GameRoom::new(name),
            None => return Ok(None),
        };

        let addr = RoomActor::new(room, self.store.clone(), Arc::downgrade(self)).start();
        self.rooms.insert(name.to_string(), addr.clone());
        info!(room = name, "Room coordinator started");
        Ok(Some(addr))
    }

    /// Called by a stopping room actor; removes the entry only if it still
    /// points at that actor (a replacement may already be registered).
    pub fn deregister(&self, name: &str, addr: &Addr<RoomActor>) {
        self.rooms.remove_if(name, |_, stored| stored == addr);
        info!(room = name, "Room coordinator deregistered");
    }
}
