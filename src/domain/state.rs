//! Game and room entities. Everything here serializes to the persisted
//! room blob and back; field names are part of the on-disk format.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::cards::Card;
use crate::domain::play::Play;

/// End-of-game rank label; drives trading on the next deal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Accolade {
    ElPresidente,
    VP,
    Pleb,
    Shithead,
}

impl Default for Accolade {
    fn default() -> Self {
        Accolade::Pleb
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    Trading,
    Playing,
}

/// Ordered stack of plays in the current round; the last play is the one to beat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pile {
    #[serde(default)]
    pub plays: Vec<Play>,
}

impl Pile {
    pub fn current_play(&self) -> Option<&Play> {
        self.plays.last()
    }

    pub fn add_play(&mut self, play: Play) {
        self.plays.push(play);
    }

    pub fn clear(&mut self) {
        self.plays.clear();
    }

    pub fn card_count(&self) -> usize {
        self.plays.iter().map(Play::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRound {
    pub starting_player_idx: usize,
    #[serde(default)]
    pub pile: Pile,
    /// Player who made the last play of the round; `None` until a play lands.
    #[serde(default)]
    pub last_play_player_idx: Option<usize>,
}

impl GameRound {
    pub fn new(starting_player_idx: usize) -> Self {
        Self {
            starting_player_idx,
            pile: Pile::default(),
            last_play_player_idx: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub past_accolade: Accolade,
    #[serde(default)]
    pub accolade: Accolade,
    #[serde(default)]
    pub hand: Vec<Card>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            past_accolade: Accolade::Pleb,
            accolade: Accolade::Pleb,
            hand: Vec::new(),
        }
    }

    pub fn sort_hand(&mut self) {
        self.hand.sort();
    }

    pub fn holds_three_of_clubs(&self) -> bool {
        self.hand.iter().any(Card::is_three_of_clubs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub dealer_idx: usize,
    pub current_player_idx: usize,
    pub players: Vec<Player>,
    pub round: GameRound,
    pub phase: GamePhase,
    /// Player ids in finish order.
    #[serde(default)]
    pub results: Vec<String>,
    /// Indices that passed since the last play landed.
    #[serde(default)]
    pub passed_this_round: BTreeSet<usize>,
    #[serde(default)]
    pub rounds_completed: u32,
    /// Forfeited by the previous Shithead, waiting for El Presidente to claim.
    #[serde(default)]
    pub trade_high_card: Option<Card>,
    /// Given up by the previous El Presidente, waiting for Shithead to claim.
    #[serde(default)]
    pub trade_low_card: Option<Card>,
    #[serde(default)]
    pub trade_ep_claimed: bool,
    #[serde(default)]
    pub trade_sh_claimed: bool,
}

impl Game {
    pub fn player_idx(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    pub fn players_with_cards(&self) -> usize {
        self.players.iter().filter(|p| !p.hand.is_empty()).count()
    }

    /// Total cards accounted for: hands, pile and any parked trade cards.
    pub fn cards_in_play(&self) -> usize {
        let hands: usize = self.players.iter().map(|p| p.hand.len()).sum();
        let parked = self.trade_high_card.iter().count() + self.trade_low_card.iter().count();
        hands + self.round.pile.card_count() + parked
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TagError {
    #[error("You cannot tag yourself")]
    SelfTag,
    #[error("Only the current holder can pass the tag on")]
    NotHolder,
    #[error("Tag is still warm; try again in {remaining}s")]
    Cooldown { remaining: u64 },
    #[error("No such player in this room")]
    UnknownTarget,
}

/// Seconds the tag must be held before it can be passed on.
pub const DICK_TAG_COOLDOWN_SECS: f64 = 15.0;

/// Room where players gather; one game at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRoom {
    pub name: String,
    #[serde(default)]
    pub current_game: Option<Game>,
    /// Everyone in the room, spectators included.
    #[serde(default)]
    pub players: Vec<Player>,
    /// player_id -> deal me in on the next game (default true).
    #[serde(default)]
    pub spectator_preferences: HashMap<String, bool>,
    #[serde(default)]
    pub dick_tagged_player_id: Option<String>,
    /// Unix seconds when the current holder was tagged.
    #[serde(default)]
    pub dick_tagged_at: Option<f64>,
}

impl GameRoom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_game: None,
            players: Vec::new(),
            spectator_preferences: HashMap::new(),
            dick_tagged_player_id: None,
            dick_tagged_at: None,
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn wants_to_play(&self, player_id: &str) -> bool {
        self.spectator_preferences
            .get(player_id)
            .copied()
            .unwrap_or(true)
    }

    /// Apply the single-slot "dick" tag rules. `now` is Unix seconds.
    ///
    /// - Unheld: any participant may tag any other participant.
    /// - Held: only the holder may pass it on, and only after the cooldown.
    /// - The holder may clear it from themselves at any time.
    pub fn apply_dick_tag(
        &mut self,
        sender_id: &str,
        target_id: &str,
        now: f64,
    ) -> Result<(), TagError> {
        let holder = self.dick_tagged_player_id.as_deref();

        if holder == Some(sender_id) && target_id == sender_id {
            self.dick_tagged_player_id = None;
            self.dick_tagged_at = None;
            return Ok(());
        }

        if target_id == sender_id {
            return Err(TagError::SelfTag);
        }
        if self.player(target_id).is_none() {
            return Err(TagError::UnknownTarget);
        }

        match holder {
            None => {}
            Some(h) if h == sender_id => {
                let held_for = now - self.dick_tagged_at.unwrap_or(now);
                if held_for < DICK_TAG_COOLDOWN_SECS {
                    let remaining = (DICK_TAG_COOLDOWN_SECS - held_for).ceil() as u64;
                    return Err(TagError::Cooldown { remaining });
                }
            }
            Some(_) => return Err(TagError::NotHolder),
        }

        self.dick_tagged_player_id = Some(target_id.to_string());
        self.dick_tagged_at = Some(now);
        Ok(())
    }

    /// Drop a player from the roster and every room-level structure that
    /// references them. Game membership is handled separately by the engine.
    pub fn remove_from_roster(&mut self, player_id: &str) {
        self.players.retain(|p| p.id != player_id);
        self.spectator_preferences.remove(player_id);
        if self.dick_tagged_player_id.as_deref() == Some(player_id) {
            self.dick_tagged_player_id = None;
            self.dick_tagged_at = None;
        }
    }
}
