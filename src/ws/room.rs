//! Per-room session coordinator.
//!
//! One `RoomActor` per room; every mutation of the room flows through its
//! mailbox, which serializes commands, timer callbacks and broadcasts.
//! Successful mutations persist the blob before any broadcast goes out (the
//! mailbox is parked on the write), and a command's ack/broadcast is sent
//! before the next command from the same connection is processed.

use std::collections::HashMap;
use std::sync::Weak;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use actix::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use crate::domain::cards::Card;
use crate::domain::play::Play;
use crate::domain::rules;
use crate::domain::state::{Accolade, GameRoom, Player};
use crate::domain::view::{room_view, ViewContext};
use crate::store::RoomStore;
use crate::ws::protocol::{ClaimRole, ClientMsg, PlayerRef, ServerMsg};
use crate::ws::registry::RoomRegistry;
use crate::ws::session::{CloseSession, Outbound, WsSession};
use crate::ws::vote::{RestartVote, VoteDecision};

/// Silence on a live connection before the player counts as disconnected.
pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(7);
const HEARTBEAT_SCAN_INTERVAL: Duration = Duration::from_secs(2);
/// Window a disconnected player has to come back before eviction.
pub const DISCONNECT_GRACE: Duration = Duration::from_secs(60);
/// Score-screen pause between consecutive games.
pub const NEXT_GAME_DELAY: Duration = Duration::from_secs(13);
pub const RESTART_VOTE_TIMEOUT: Duration = Duration::from_secs(30);
/// Seat cap when assembling a game from the roster.
pub const MAX_SEATS: usize = rules::MAX_PLAYERS;

#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub player_id: String,
    pub addr: Addr<WsSession>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct SessionClosed {
    pub player_id: String,
    pub addr: Addr<WsSession>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Command {
    pub player_id: String,
    pub msg: ClientMsg,
}

/// Lobby join (HTTP): resolve a display name to a player id, creating the
/// player on first sight.
#[derive(Message)]
#[rtype(result = "String")]
pub struct Join {
    pub player_name: String,
}

struct Conn {
    addr: Addr<WsSession>,
    last_heartbeat: Instant,
}

struct GraceTimer {
    handle: SpawnHandle,
    deadline: Instant,
}

struct VoteState {
    vote: RestartVote,
    timeout: SpawnHandle,
}

pub struct RoomActor {
    room: GameRoom,
    store: RoomStore,
    registry: Weak<RoomRegistry>,
    rng: StdRng,
    conns: HashMap<String, Conn>,
    grace: HashMap<String, GraceTimer>,
    vote: Option<VoteState>,
    next_game: Option<SpawnHandle>,
}

fn epoch_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

impl RoomActor {
    pub fn new(mut room: GameRoom, store: RoomStore, registry: Weak<RoomRegistry>) -> Self {
        // A reloaded blob may predate a roster write: make sure everyone in
        // the running game is on the roster.
        if let Some(game) = &room.current_game {
            let missing: Vec<Player> = game
                .players
                .iter()
                .filter(|gp| !room.players.iter().any(|p| p.id == gp.id))
                .cloned()
                .collect();
            room.players.extend(missing);
        }

        Self {
            room,
            store,
            registry,
            rng: StdRng::from_os_rng(),
            conns: HashMap::new(),
            grace: HashMap::new(),
            vote: None,
            next_game: None,
        }
    }

    // ---- outbound plumbing ----------------------------------------------

    fn view_context(&self) -> ViewContext {
        let now = Instant::now();
        ViewContext {
            live_player_ids: self
                .conns
                .iter()
                .filter(|(_, c)| c.addr.connected())
                .map(|(id, _)| id.clone())
                .collect(),
            disconnected_secs: self
                .grace
                .iter()
                .map(|(id, t)| {
                    (
                        id.clone(),
                        t.deadline.saturating_duration_since(now).as_secs(),
                    )
                })
                .collect(),
        }
    }

    fn send_to(&self, player_id: &str, msg: ServerMsg) {
        if let Some(conn) = self.conns.get(player_id) {
            conn.addr.do_send(Outbound(msg));
        }
    }

    fn send_error(&self, player_id: &str, message: impl Into<String>) {
        self.send_to(
            player_id,
            ServerMsg::Error {
                message: message.into(),
            },
        );
    }

    fn broadcast(&self, msg: ServerMsg) {
        for conn in self.conns.values() {
            conn.addr.do_send(Outbound(msg.clone()));
        }
    }

    fn broadcast_except(&self, exclude_id: &str, msg: ServerMsg) {
        for (id, conn) in &self.conns {
            if id != exclude_id {
                conn.addr.do_send(Outbound(msg.clone()));
            }
        }
    }

    fn send_state_to(&self, player_id: &str) {
        let ctx = self.view_context();
        let state = room_view(&self.room, player_id, &ctx);
        self.send_to(
            player_id,
            ServerMsg::State {
                state,
                player_id: player_id.to_string(),
            },
        );
    }

    /// Fan out a per-recipient filtered view to every live connection.
    fn broadcast_state(&self, exclude_id: Option<&str>) {
        let ctx = self.view_context();
        for (id, conn) in &self.conns {
            if exclude_id == Some(id.as_str()) {
                continue;
            }
            let state = room_view(&self.room, id, &ctx);
            conn.addr.do_send(Outbound(ServerMsg::State {
                state,
                player_id: id.clone(),
            }));
        }
    }

    /// Persist the blob, then run `then`. The mailbox is parked on the write
    /// so nothing else interleaves; a failed write is logged and the
    /// in-memory state stands.
    fn persist_then<F>(&mut self, ctx: &mut Context<Self>, then: F)
    where
        F: FnOnce(&mut Self, &mut Context<Self>) + 'static,
    {
        let store = self.store.clone();
        let room = self.room.clone();
        ctx.wait(
            async move { store.save(&room).await }
                .into_actor(self)
                .map(move |res, actor, ctx| {
                    if let Err(err) = res {
                        error!(room = %actor.room.name, error = %err, "Failed to persist room");
                    }
                    then(actor, ctx);
                }),
        );
    }

    // ---- liveness --------------------------------------------------------

    fn start_grace(&mut self, ctx: &mut Context<Self>, player_id: &str) {
        if self.grace.contains_key(player_id) {
            return;
        }
        let pid = player_id.to_string();
        let handle = ctx.run_later(DISCONNECT_GRACE, move |actor, ctx| {
            actor.grace.remove(&pid);
            info!(room = %actor.room.name, player_id = %pid, "Grace period expired");
            actor.force_remove(ctx, &pid);
        });
        self.grace.insert(
            player_id.to_string(),
            GraceTimer {
                handle,
                deadline: Instant::now() + DISCONNECT_GRACE,
            },
        );
    }

    fn cancel_grace(&mut self, ctx: &mut Context<Self>, player_id: &str) -> bool {
        match self.grace.remove(player_id) {
            Some(timer) => {
                ctx.cancel_future(timer.handle);
                true
            }
            None => false,
        }
    }

    fn scan_heartbeats(&mut self, ctx: &mut Context<Self>) {
        let now = Instant::now();
        let silent: Vec<String> = self
            .conns
            .iter()
            .filter(|(id, conn)| {
                now.duration_since(conn.last_heartbeat) > HEARTBEAT_TIMEOUT
                    && !self.grace.contains_key(*id)
            })
            .map(|(id, _)| id.clone())
            .collect();

        if silent.is_empty() {
            return;
        }
        for id in &silent {
            info!(room = %self.room.name, player_id = %id, "Heartbeat timed out");
            self.start_grace(ctx, id);
            self.broadcast(ServerMsg::PlayerDisconnected {
                player_id: id.clone(),
            });
        }
        self.broadcast_state(None);
    }

    /// Remove a player from the game and the room. Runs for voluntary
    /// leaves and for grace-period expiry.
    fn force_remove(&mut self, ctx: &mut Context<Self>, player_id: &str) {
        self.cancel_grace(ctx, player_id);
        if let Some(conn) = self.conns.remove(player_id) {
            conn.addr.do_send(CloseSession);
        }

        let mut game_ended = false;
        if let Some(game) = self.room.current_game.as_mut() {
            if let Some(idx) = game.player_idx(player_id) {
                game_ended = rules::remove_player_from_game(game, idx);
            }
        }

        self.room.remove_from_roster(player_id);
        info!(room = %self.room.name, player_id = %player_id, "Player removed");

        if self.room.players.is_empty() {
            // Last one out: reinitialize the blob and retire the actor
            // (stopping drops every outstanding timer with it).
            self.room = GameRoom::new(self.room.name.clone());
            self.vote = None;
            self.next_game = None;
            self.persist_then(ctx, |actor, ctx| {
                info!(room = %actor.room.name, "Room reinitialized (all players left)");
                ctx.stop();
            });
            return;
        }

        if game_ended {
            let results = self
                .room
                .current_game
                .as_ref()
                .map(|g| g.results.clone())
                .unwrap_or_default();
            self.persist_then(ctx, move |actor, ctx| {
                actor.broadcast(ServerMsg::GameOver { results });
                actor.broadcast_state(None);
                actor.schedule_next_game(ctx);
            });
        } else {
            self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None));
        }
    }

    // ---- game assembly ---------------------------------------------------

    /// Roster members who want to be dealt in, in roster order, capped at
    /// the seat limit.
    fn eligible_players(&self) -> Vec<Player> {
        self.room
            .players
            .iter()
            .filter(|p| self.room.wants_to_play(&p.id))
            .take(MAX_SEATS)
            .cloned()
            .collect()
    }

    fn schedule_next_game(&mut self, ctx: &mut Context<Self>) {
        // At most one pending next-game task per room.
        if let Some(handle) = self.next_game.take() {
            ctx.cancel_future(handle);
        }
        let handle = ctx.run_later(NEXT_GAME_DELAY, |actor, ctx| {
            actor.next_game = None;
            actor.start_next_game(ctx);
        });
        self.next_game = Some(handle);
    }

    /// Roll the finished game's accolades into the roster and deal the next
    /// game, carrying dealer rotation and trading roles forward.
    fn start_next_game(&mut self, ctx: &mut Context<Self>) {
        let Some(game) = self.room.current_game.as_ref() else {
            return;
        };
        let prev_dealer = game.dealer_idx;
        let prev_ep = game
            .players
            .iter()
            .find(|p| p.accolade == Accolade::ElPresidente)
            .map(|p| p.id.clone());
        let prev_sh = game
            .players
            .iter()
            .find(|p| p.accolade == Accolade::Shithead)
            .map(|p| p.id.clone());

        let earned: Vec<(String, Accolade)> = game
            .players
            .iter()
            .map(|p| (p.id.clone(), p.accolade))
            .collect();
        for rp in &mut self.room.players {
            if let Some((_, accolade)) = earned.iter().find(|(id, _)| *id == rp.id) {
                rp.past_accolade = *accolade;
            }
        }

        let players = self.eligible_players();
        if players.len() < rules::MIN_PLAYERS {
            self.room.current_game = None;
            info!(room = %self.room.name, "Next game skipped (not enough players)");
            self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None));
            return;
        }

        match rules::start_new_game(
            &players,
            Some(prev_dealer),
            prev_ep.as_deref(),
            prev_sh.as_deref(),
            &mut self.rng,
        ) {
            Ok(next) => {
                self.room.current_game = Some(next);
                info!(room = %self.room.name, "Next game started");
                self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None));
            }
            Err(err) => {
                warn!(room = %self.room.name, error = %err, "Next game failed to start");
                self.room.current_game = None;
                self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None));
            }
        }
    }

    // ---- command handlers ------------------------------------------------

    fn handle_play(&mut self, ctx: &mut Context<Self>, player_id: &str, cards: Vec<Card>) {
        let outcome = {
            let Some(game) = self.room.current_game.as_mut() else {
                self.send_error(player_id, "No game in progress");
                return;
            };
            let Some(idx) = game.player_idx(player_id) else {
                self.send_error(player_id, "You are not in this game");
                return;
            };
            let play = Play::new(cards);
            match rules::apply_play(game, idx, &play) {
                Err(err) => Err(err),
                Ok(()) => Ok(rules::finish_if_over(game)),
            }
        };

        match outcome {
            Err(err) => self.send_error(player_id, err.to_string()),
            Ok(false) => self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None)),
            Ok(true) => {
                let results = self
                    .room
                    .current_game
                    .as_ref()
                    .map(|g| g.results.clone())
                    .unwrap_or_default();
                info!(room = %self.room.name, ?results, "Game over");
                self.persist_then(ctx, move |actor, ctx| {
                    actor.broadcast(ServerMsg::GameOver { results });
                    actor.broadcast_state(None);
                    actor.schedule_next_game(ctx);
                });
            }
        }
    }

    fn handle_pass(&mut self, ctx: &mut Context<Self>, player_id: &str) {
        let result = {
            let Some(game) = self.room.current_game.as_mut() else {
                self.send_error(player_id, "No game in progress");
                return;
            };
            let Some(idx) = game.player_idx(player_id) else {
                self.send_error(player_id, "You are not in this game");
                return;
            };
            rules::apply_pass(game, idx)
        };

        match result {
            Err(err) => self.send_error(player_id, err.to_string()),
            Ok(()) => self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None)),
        }
    }

    fn handle_start_game(&mut self, ctx: &mut Context<Self>, player_id: &str) {
        if self.room.current_game.is_some() {
            self.send_error(player_id, "Game already in progress");
            return;
        }
        let players = self.eligible_players();
        if players.len() < rules::MIN_PLAYERS {
            self.send_error(player_id, "Need at least 2 players");
            return;
        }

        let prev_ep = self
            .room
            .players
            .iter()
            .find(|p| p.past_accolade == Accolade::ElPresidente)
            .map(|p| p.id.clone());
        let prev_sh = self
            .room
            .players
            .iter()
            .find(|p| p.past_accolade == Accolade::Shithead)
            .map(|p| p.id.clone());

        match rules::start_new_game(
            &players,
            None,
            prev_ep.as_deref(),
            prev_sh.as_deref(),
            &mut self.rng,
        ) {
            Ok(game) => {
                self.room.current_game = Some(game);
                info!(room = %self.room.name, players = players.len(), "Game started");
                self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None));
            }
            Err(err) => self.send_error(player_id, err.to_string()),
        }
    }

    fn handle_claim_trade(&mut self, ctx: &mut Context<Self>, player_id: &str, role: ClaimRole) {
        let result = {
            let Some(game) = self.room.current_game.as_mut() else {
                self.send_error(player_id, "No game in progress");
                return;
            };
            rules::apply_claim_trade(game, player_id, role.into())
        };

        match result {
            Err(err) => self.send_error(player_id, err.to_string()),
            Ok(()) => self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None)),
        }
    }

    // ---- restart votes ---------------------------------------------------

    fn handle_request_restart_vote(&mut self, ctx: &mut Context<Self>, player_id: &str) {
        let initiator_name = {
            let Some(game) = self.room.current_game.as_ref() else {
                self.send_error(player_id, "No game in progress");
                return;
            };
            let Some(idx) = game.player_idx(player_id) else {
                self.send_error(player_id, "You are not in this game");
                return;
            };
            game.players[idx].name.clone()
        };

        // Opening a new vote cancels any prior one.
        if let Some(prior) = self.vote.take() {
            ctx.cancel_future(prior.timeout);
        }

        let timeout = ctx.run_later(RESTART_VOTE_TIMEOUT, |actor, ctx| {
            actor.resolve_vote_timeout(ctx);
        });
        self.vote = Some(VoteState {
            vote: RestartVote::new(player_id),
            timeout,
        });
        info!(room = %self.room.name, initiator = %initiator_name, "Restart vote opened");
        self.broadcast_except(player_id, ServerMsg::RestartVoteRequested { initiator_name });
        self.resolve_vote(ctx);
    }

    fn handle_restart_vote(&mut self, ctx: &mut Context<Self>, player_id: &str, yes: bool) {
        if self.vote.is_none() {
            self.send_error(player_id, "No vote in progress");
            return;
        }
        let eligible = self
            .room
            .current_game
            .as_ref()
            .map(|g| g.player_idx(player_id).is_some())
            .unwrap_or(false);
        if !eligible {
            self.send_error(player_id, "You are not in this game");
            return;
        }
        if let Some(state) = self.vote.as_mut() {
            state.vote.record(player_id, yes);
        }
        self.resolve_vote(ctx);
    }

    fn eligible_voter_ids(&self) -> Vec<String> {
        self.room
            .current_game
            .as_ref()
            .map(|g| g.players.iter().map(|p| p.id.clone()).collect())
            .unwrap_or_default()
    }

    fn resolve_vote(&mut self, ctx: &mut Context<Self>) {
        let eligible = self.eligible_voter_ids();
        if eligible.is_empty() {
            // The game went away underneath the vote.
            if let Some(state) = self.vote.take() {
                ctx.cancel_future(state.timeout);
            }
            return;
        }
        let Some(state) = self.vote.as_ref() else {
            return;
        };
        match state.vote.decide(&eligible) {
            VoteDecision::Pending => {}
            decision => {
                if let Some(state) = self.vote.take() {
                    ctx.cancel_future(state.timeout);
                }
                self.conclude_vote(ctx, decision);
            }
        }
    }

    fn resolve_vote_timeout(&mut self, ctx: &mut Context<Self>) {
        let Some(mut state) = self.vote.take() else {
            return;
        };
        let eligible = self.eligible_voter_ids();
        if eligible.is_empty() {
            return;
        }
        // Absentees vote no; this tally always decides.
        let decision = state.vote.decide_with_absent_as_no(&eligible);
        info!(room = %self.room.name, ?decision, "Restart vote timed out");
        self.conclude_vote(ctx, decision);
    }

    fn conclude_vote(&mut self, ctx: &mut Context<Self>, decision: VoteDecision) {
        match decision {
            VoteDecision::Pending => {}
            VoteDecision::Rejected => {
                info!(room = %self.room.name, "Restart vote rejected");
                self.broadcast(ServerMsg::RestartVoteRejected);
            }
            VoteDecision::Passed => {
                info!(room = %self.room.name, "Restart vote passed");
                if let Some(handle) = self.next_game.take() {
                    ctx.cancel_future(handle);
                }
                for p in &mut self.room.players {
                    p.past_accolade = Accolade::Pleb;
                }
                let players = self.eligible_players();
                match rules::start_new_game(&players, None, None, None, &mut self.rng) {
                    Ok(game) => self.room.current_game = Some(game),
                    Err(err) => {
                        warn!(room = %self.room.name, error = %err, "Restart failed to deal");
                        self.room.current_game = None;
                    }
                }
                self.persist_then(ctx, |actor, _ctx| {
                    actor.broadcast(ServerMsg::RestartVotePassed);
                    actor.broadcast_state(None);
                });
            }
        }
    }

    // ---- misc commands ---------------------------------------------------

    fn handle_spectator_preference(
        &mut self,
        ctx: &mut Context<Self>,
        player_id: &str,
        wants_to_play: bool,
    ) {
        self.room
            .spectator_preferences
            .insert(player_id.to_string(), wants_to_play);
        self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None));
    }

    fn handle_tag_dick(&mut self, ctx: &mut Context<Self>, player_id: &str, target_id: &str) {
        match self.room.apply_dick_tag(player_id, target_id, epoch_now()) {
            Ok(()) => self.persist_then(ctx, |actor, _ctx| actor.broadcast_state(None)),
            Err(err) => self.send_error(player_id, err.to_string()),
        }
    }
}

impl Actor for RoomActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            room = %self.room.name,
            players = self.room.players.len(),
            has_game = self.room.current_game.is_some(),
            "[ROOM] coordinator started"
        );
        ctx.run_interval(HEARTBEAT_SCAN_INTERVAL, |actor, ctx| {
            actor.scan_heartbeats(ctx);
        });
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        if let Some(registry) = self.registry.upgrade() {
            registry.deregister(&self.room.name, &ctx.address());
        }
        info!(room = %self.room.name, "[ROOM] coordinator stopped");
    }
}

impl Handler<Join> for RoomActor {
    type Result = String;

    fn handle(&mut self, msg: Join, ctx: &mut Self::Context) -> Self::Result {
        if let Some(existing) = self.room.player_by_name(&msg.player_name) {
            return existing.id.clone();
        }

        let player_id = uuid::Uuid::new_v4().to_string();
        self.room
            .players
            .push(Player::new(player_id.clone(), msg.player_name.clone()));
        info!(room = %self.room.name, name = %msg.player_name, "Player joined via lobby");
        self.persist_then(ctx, |_actor, _ctx| {});
        player_id
    }
}

impl Handler<Connect> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: Connect, ctx: &mut Self::Context) -> Self::Result {
        let Connect { player_id, addr } = msg;

        if self.room.player(&player_id).is_none() {
            addr.do_send(Outbound(ServerMsg::Error {
                message: "Unknown player; join from lobby first".to_string(),
            }));
            addr.do_send(CloseSession);
            return;
        }

        if let Some(existing) = self.conns.get(&player_id) {
            if existing.addr.connected() && existing.addr != addr {
                addr.do_send(Outbound(ServerMsg::Error {
                    message: "Id already in use".to_string(),
                }));
                addr.do_send(CloseSession);
                return;
            }
        }

        let reconnect = self.cancel_grace(ctx, &player_id);
        let name = self
            .room
            .player(&player_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        info!(room = %self.room.name, player = %name, reconnect, "Player connected");

        self.conns.insert(
            player_id.clone(),
            Conn {
                addr,
                last_heartbeat: Instant::now(),
            },
        );

        self.send_state_to(&player_id);
        if !reconnect {
            self.broadcast_except(
                &player_id,
                ServerMsg::PlayerJoined {
                    player: PlayerRef {
                        id: player_id.clone(),
                        name,
                    },
                },
            );
        }
        self.broadcast_state(Some(&player_id));
    }
}

impl Handler<SessionClosed> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: SessionClosed, ctx: &mut Self::Context) -> Self::Result {
        let SessionClosed { player_id, addr } = msg;

        // A newer session may have taken the id over; only the owner of the
        // current entry gets to tear it down.
        let is_current = self
            .conns
            .get(&player_id)
            .map(|conn| conn.addr == addr)
            .unwrap_or(false);
        if !is_current {
            return;
        }
        self.conns.remove(&player_id);

        if self.room.player(&player_id).is_some() {
            info!(room = %self.room.name, player_id = %player_id, "Connection lost; grace period starts");
            self.start_grace(ctx, &player_id);
            self.broadcast(ServerMsg::PlayerDisconnected {
                player_id: player_id.clone(),
            });
            self.broadcast_state(None);
        }
    }
}

impl Handler<Command> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: Command, ctx: &mut Self::Context) -> Self::Result {
        let Command { player_id, msg } = msg;

        // Any inbound traffic counts as liveness and merges a pending
        // reconnect window.
        if let Some(conn) = self.conns.get_mut(&player_id) {
            conn.last_heartbeat = Instant::now();
        }
        if self.cancel_grace(ctx, &player_id) {
            self.broadcast_state(None);
        }

        match msg {
            ClientMsg::Heartbeat => {}
            ClientMsg::StateRequest => self.send_state_to(&player_id),
            ClientMsg::Leave => {
                self.send_to(&player_id, ServerMsg::YouLeft);
                self.force_remove(ctx, &player_id);
            }
            ClientMsg::Play { cards } => self.handle_play(ctx, &player_id, cards),
            ClientMsg::Pass => self.handle_pass(ctx, &player_id),
            ClientMsg::StartGame => self.handle_start_game(ctx, &player_id),
            ClientMsg::ClaimTrade { role } => self.handle_claim_trade(ctx, &player_id, role),
            ClientMsg::RequestRestartVote => self.handle_request_restart_vote(ctx, &player_id),
            ClientMsg::RestartVote { vote } => {
                self.handle_restart_vote(ctx, &player_id, vote.as_bool())
            }
            ClientMsg::SpectatorPreference { wants_to_play } => {
                self.handle_spectator_preference(ctx, &player_id, wants_to_play)
            }
            ClientMsg::TagDick { target_id } => {
                self.handle_tag_dick(ctx, &player_id, &target_id)
            }
        }
    }
}
