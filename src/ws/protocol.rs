//! Wire protocol: JSON envelopes discriminated by a `type` field.

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::rules::TradeRole;
use crate::domain::view::RoomView;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Heartbeat,
    StateRequest,
    Leave,
    Play { cards: Vec<Card> },
    Pass,
    StartGame,
    ClaimTrade { role: ClaimRole },
    RequestRestartVote,
    RestartVote { vote: VoteChoice },
    SpectatorPreference { wants_to_play: bool },
    TagDick { target_id: String },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimRole {
    Presidente,
    Shithead,
}

impl From<ClaimRole> for TradeRole {
    fn from(role: ClaimRole) -> Self {
        match role {
            ClaimRole::Presidente => TradeRole::Presidente,
            ClaimRole::Shithead => TradeRole::Shithead,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Yes,
    No,
}

impl VoteChoice {
    pub fn as_bool(self) -> bool {
        matches!(self, VoteChoice::Yes)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    State {
        state: RoomView,
        player_id: String,
    },
    Error {
        message: String,
    },
    PlayerJoined {
        player: PlayerRef,
    },
    PlayerDisconnected {
        player_id: String,
    },
    GameOver {
        results: Vec<String>,
    },
    RestartVoteRequested {
        initiator_name: String,
    },
    RestartVotePassed,
    RestartVoteRejected,
    YouLeft,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
}
