//! Per-recipient view projection.
//!
//! Views are built field by field from the room state; the full `Game` is
//! never serialized and then stripped. A missed field there would leak
//! hands, so filtering is treated as a safety property, not a formatting
//! concern.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::cards::Card;
use crate::domain::legal::valid_plays;
use crate::domain::play::Play;
use crate::domain::state::{Accolade, Game, GamePhase, GameRoom};

/// Liveness inputs the projector needs from the coordinator.
#[derive(Debug, Default)]
pub struct ViewContext {
    /// Player ids with an open connection right now.
    pub live_player_ids: HashSet<String>,
    /// Players with a grace timer in flight, with seconds until eviction.
    pub disconnected_secs: HashMap<String, u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RoomView {
    Lobby(LobbyView),
    Game(Box<GameView>),
}

/// View of a room with no game running: the lobby list is by live
/// connection, with no grace period.
#[derive(Debug, Clone, Serialize)]
pub struct LobbyView {
    pub phase: &'static str,
    pub room: String,
    pub players: Vec<LobbySeatView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dick_tagged_player_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LobbySeatView {
    pub id: String,
    pub name: String,
    pub past_accolade: Accolade,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub phase: GamePhase,
    pub room: String,
    pub dealer_idx: usize,
    pub current_player_idx: usize,
    pub players: Vec<SeatView>,
    pub round: RoundView,
    pub results: Vec<String>,
    pub passed_this_round: Vec<usize>,
    pub valid_plays: Vec<Vec<Card>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading: Option<TradingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_on: Option<WaitingView>,
    pub spectator: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wants_to_play: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dick_tagged_player_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub id: String,
    pub name: String,
    pub past_accolade: Accolade,
    pub accolade: Accolade,
    pub card_count: usize,
    pub in_results: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_position: Option<usize>,
    pub disconnected: bool,
    /// Present only on the recipient's own seat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundView {
    pub starting_player_idx: usize,
    pub pile: PileView,
}

#[derive(Debug, Clone, Serialize)]
pub struct PileView {
    pub plays: Vec<Play>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TradingView {
    /// Face-up only to the incoming El Presidente.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_card: Option<Card>,
    /// Face-up only to the incoming Shithead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_card: Option<Card>,
    pub ep_claimed: bool,
    pub sh_claimed: bool,
    pub face_down: bool,
    pub trade_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaitingView {
    pub name: String,
    pub seconds_remaining: u64,
}

/// Build the state a single recipient is allowed to see.
pub fn room_view(room: &GameRoom, recipient_id: &str, ctx: &ViewContext) -> RoomView {
    let Some(game) = &room.current_game else {
        let players = room
            .players
            .iter()
            .filter(|p| ctx.live_player_ids.contains(&p.id))
            .map(|p| LobbySeatView {
                id: p.id.clone(),
                name: p.name.clone(),
                past_accolade: p.past_accolade,
            })
            .collect();
        return RoomView::Lobby(LobbyView {
            phase: "no_game",
            room: room.name.clone(),
            players,
            dick_tagged_player_id: room.dick_tagged_player_id.clone(),
        });
    };

    let recipient_idx = game.player_idx(recipient_id);
    let spectator = recipient_idx.is_none();

    let players = game
        .players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let result_position = game.results.iter().position(|id| *id == p.id);
            SeatView {
                id: p.id.clone(),
                name: p.name.clone(),
                past_accolade: p.past_accolade,
                accolade: p.accolade,
                card_count: p.hand.len(),
                in_results: result_position.is_some(),
                result_position: result_position.map(|pos| pos + 1),
                disconnected: ctx.disconnected_secs.contains_key(&p.id),
                hand: (recipient_idx == Some(i)).then(|| p.hand.clone()),
            }
        })
        .collect();

    let valid = match recipient_idx {
        Some(idx) if game.phase == GamePhase::Playing && game.current_player_idx == idx => {
            let current = game.round.pile.current_play();
            let num_required = current.filter(|c| !c.is_empty()).map(Play::len);
            let must_3c = num_required.is_none()
                && game.round.starting_player_idx == idx
                && game.rounds_completed == 0;
            valid_plays(&game.players[idx].hand, current, num_required, must_3c)
        }
        _ => Vec::new(),
    };

    let trading = (game.phase == GamePhase::Trading).then(|| trading_view(game, recipient_id));

    let waiting_on = {
        let acting = &game.players[game.current_player_idx];
        ctx.disconnected_secs
            .get(&acting.id)
            .map(|&secs| WaitingView {
                name: acting.name.clone(),
                seconds_remaining: secs,
            })
    };

    RoomView::Game(Box::new(GameView {
        phase: game.phase,
        room: room.name.clone(),
        dealer_idx: game.dealer_idx,
        current_player_idx: game.current_player_idx,
        players,
        round: RoundView {
            starting_player_idx: game.round.starting_player_idx,
            pile: PileView {
                plays: game.round.pile.plays.clone(),
            },
        },
        results: game.results.clone(),
        passed_this_round: game.passed_this_round.iter().copied().collect(),
        valid_plays: valid,
        trading,
        waiting_on,
        spectator,
        wants_to_play: spectator.then(|| room.wants_to_play(recipient_id)),
        dick_tagged_player_id: room.dick_tagged_player_id.clone(),
    }))
}

/// Parked trade cards are face-up only to the role they are destined for.
fn trading_view(game: &Game, recipient_id: &str) -> TradingView {
    let past = game
        .player_idx(recipient_id)
        .map(|i| game.players[i].past_accolade);
    let is_ep = past == Some(Accolade::ElPresidente);
    let is_sh = past == Some(Accolade::Shithead);

    TradingView {
        high_card: game.trade_high_card.filter(|_| is_ep),
        low_card: game.trade_low_card.filter(|_| is_sh),
        ep_claimed: game.trade_ep_claimed,
        sh_claimed: game.trade_sh_claimed,
        face_down: !(is_ep || is_sh),
        trade_count: game.trade_high_card.iter().count() + game.trade_low_card.iter().count(),
    }
}
