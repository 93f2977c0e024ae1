//! Rules engine: dealing games, resolving plays and passes, round and game
//! termination, accolade trading and mid-game ejection.
//!
//! Every entry point is pure over the passed-in state and returns either
//! success or a structured [`GameError`]. The session coordinator owns the
//! side effects (persistence, broadcasting, timers).

use rand::Rng;
use tracing::info;

use crate::domain::cards::Card;
use crate::domain::dealing::deal;
use crate::domain::errors::GameError;
use crate::domain::legal::is_valid_play;
use crate::domain::play::Play;
use crate::domain::state::{Accolade, Game, GamePhase, GameRound, Player};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 7;

/// Highest card in a hand by total order.
fn highest_card(hand: &[Card]) -> Option<Card> {
    hand.iter().max().copied()
}

/// Lowest card in a hand by total order, never the 3♣ (it anchors the
/// opening lead and must stay with its holder).
fn lowest_tradable_card(hand: &[Card]) -> Option<Card> {
    hand.iter()
        .filter(|c| !c.is_three_of_clubs())
        .min()
        .copied()
}

fn remove_exact_card(hand: &mut Vec<Card>, card: Card) -> bool {
    if let Some(pos) = hand.iter().position(|c| *c == card) {
        hand.remove(pos);
        true
    } else {
        false
    }
}

/// Point the round at the 3♣ holder (first round opener). When the 3♣ is out
/// of play — a mid-trade ejection can drop it — the current starter stands.
fn seed_opening_player(game: &mut Game) {
    if let Some(idx) = game.players.iter().position(Player::holds_three_of_clubs) {
        game.round.starting_player_idx = idx;
    }
    game.current_player_idx = game.round.starting_player_idx;
}

/// Start a new game from the room's player roster.
///
/// The dealer is the seat after the previous dealer (or 0). When both the
/// previous El Presidente and Shithead are seated, the game opens in the
/// Trading phase with their trade cards parked; otherwise play starts
/// immediately with the 3♣ holder leading.
pub fn start_new_game<R: Rng + ?Sized>(
    room_players: &[Player],
    prev_dealer_idx: Option<usize>,
    prev_el_presidente_id: Option<&str>,
    prev_shithead_id: Option<&str>,
    rng: &mut R,
) -> Result<Game, GameError> {
    let n = room_players.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
        return Err(GameError::PlayerCount);
    }

    let mut players: Vec<Player> = room_players
        .iter()
        .map(|rp| Player {
            id: rp.id.clone(),
            name: rp.name.clone(),
            past_accolade: rp.past_accolade,
            accolade: Accolade::Pleb,
            hand: Vec::new(),
        })
        .collect();

    let dealer_idx = prev_dealer_idx.map(|d| (d + 1) % n).unwrap_or(0);

    deal(&mut players, rng);

    let ep_idx = prev_el_presidente_id.and_then(|id| players.iter().position(|p| p.id == id));
    let sh_idx = prev_shithead_id.and_then(|id| players.iter().position(|p| p.id == id));
    let phase = match (ep_idx, sh_idx) {
        (Some(_), Some(_)) => GamePhase::Trading,
        _ => GamePhase::Playing,
    };

    let mut game = Game {
        dealer_idx,
        current_player_idx: 0,
        players,
        round: GameRound::new(0),
        phase,
        results: Vec::new(),
        passed_this_round: Default::default(),
        rounds_completed: 0,
        trade_high_card: None,
        trade_low_card: None,
        trade_ep_claimed: false,
        trade_sh_claimed: false,
    };

    match phase {
        GamePhase::Playing => seed_opening_player(&mut game),
        GamePhase::Trading => {
            // Park the trade cards in the center; each role claims explicitly.
            let (ep_idx, sh_idx) = (ep_idx.unwrap_or(0), sh_idx.unwrap_or(0));
            if let Some(high) = highest_card(&game.players[sh_idx].hand) {
                remove_exact_card(&mut game.players[sh_idx].hand, high);
                game.trade_high_card = Some(high);
            }
            if let Some(low) = lowest_tradable_card(&game.players[ep_idx].hand) {
                remove_exact_card(&mut game.players[ep_idx].hand, low);
                game.trade_low_card = Some(low);
            }
        }
    }

    info!(players = n, phase = ?game.phase, "Game started");
    Ok(game)
}

/// Apply a play from the acting player.
///
/// On success the cards leave the hand, the play lands on the pile and the
/// trick reopens: `passed_this_round` clears so everyone still holding cards
/// may act again. The turn then advances circularly past passed and
/// empty-handed seats; when nobody else may act, the round ends.
pub fn apply_play(game: &mut Game, player_idx: usize, play: &Play) -> Result<(), GameError> {
    if game.phase != GamePhase::Playing {
        return Err(GameError::NotPlayingPhase);
    }
    if game.current_player_idx != player_idx {
        return Err(GameError::NotYourTurn);
    }
    if play.is_empty() {
        return Err(GameError::EmptyPlay);
    }

    let num_required = game
        .round
        .pile
        .current_play()
        .filter(|c| !c.is_empty())
        .map(Play::len);
    let is_first_play = num_required.is_none();
    let must_open_3c = is_first_play
        && game.round.starting_player_idx == player_idx
        && game.rounds_completed == 0;

    if !is_valid_play(play, game.round.pile.current_play(), num_required) {
        return Err(GameError::InvalidPlay);
    }
    if must_open_3c && !play.contains_three_of_clubs() {
        return Err(GameError::MustOpenWithThreeOfClubs);
    }

    // Match cards by (rank, suit) against a scratch copy so a half-legal
    // play (including duplicated cards) leaves the hand untouched.
    let mut scratch = game.players[player_idx].hand.clone();
    for &card in &play.cards {
        if !remove_exact_card(&mut scratch, card) {
            return Err(GameError::CardNotInHand);
        }
    }
    game.players[player_idx].hand = scratch;

    game.round.pile.add_play(play.clone());
    game.round.last_play_player_idx = Some(player_idx);
    // A landed play reopens the trick to every other non-out player.
    game.passed_this_round.clear();

    if game.players[player_idx].hand.is_empty() {
        let id = game.players[player_idx].id.clone();
        game.results.push(id);
    }

    match next_actor(game, player_idx) {
        Some(next) => game.current_player_idx = next,
        None => end_round(game, player_idx),
    }
    Ok(())
}

/// Apply a pass from the acting player.
pub fn apply_pass(game: &mut Game, player_idx: usize) -> Result<(), GameError> {
    if game.phase != GamePhase::Playing {
        return Err(GameError::NotPlayingPhase);
    }
    if game.current_player_idx != player_idx {
        return Err(GameError::NotYourTurn);
    }

    game.passed_this_round.insert(player_idx);

    // When the walk would hand the trick back to the player whose play tops
    // the pile, everyone else has passed or gone out: the trick is theirs.
    match next_actor(game, player_idx) {
        Some(next) if Some(next) != game.round.last_play_player_idx => {
            game.current_player_idx = next;
        }
        _ => end_round(game, player_idx),
    }
    Ok(())
}

/// Next seat after `player_idx` that may still act this trick: circular walk
/// bounded by the table size, skipping passed and empty-handed seats. `None`
/// means the trick is over.
fn next_actor(game: &Game, player_idx: usize) -> Option<usize> {
    let n = game.players.len();
    (1..n)
        .map(|step| (player_idx + step) % n)
        .find(|&i| !game.passed_this_round.contains(&i) && !game.players[i].hand.is_empty())
}

/// Close the trick: clear the pile, credit the winner with the next lead
/// (or the next seat still holding cards when the winner went out).
fn end_round(game: &mut Game, acting_idx: usize) {
    let winner_idx = game.round.last_play_player_idx.unwrap_or(acting_idx);
    info!(winner = %game.players[winner_idx].name, "Round ended");

    game.rounds_completed += 1;
    game.round.pile.clear();
    game.round.last_play_player_idx = None;
    game.passed_this_round.clear();

    let n = game.players.len();
    let mut start_idx = winner_idx;
    if game.players[winner_idx].hand.is_empty() {
        start_idx = (1..n)
            .map(|step| (winner_idx + step) % n)
            .find(|&i| !game.players[i].hand.is_empty())
            .unwrap_or((winner_idx + 1) % n);
    }
    game.round.starting_player_idx = start_idx;
    game.current_player_idx = start_idx;
}

/// Coordinator-side game-over check, run after every successful play: with
/// at most one player still holding cards, the holdout finishes last and
/// accolades are handed out. Returns whether the game just ended.
pub fn finish_if_over(game: &mut Game) -> bool {
    if game.players_with_cards() > 1 {
        return false;
    }
    if let Some(holdout) = game.players.iter().find(|p| !p.hand.is_empty()) {
        game.results.push(holdout.id.clone());
    }
    assign_accolades(game);
    true
}

/// results[0] → El Presidente, results[n−1] → Shithead, results[1] → VP,
/// the rest Pleb. Anyone missing from the results (ejected) is Shithead.
pub fn assign_accolades(game: &mut Game) {
    let n = game.players.len();
    for (i, id) in game.results.clone().iter().enumerate() {
        let Some(idx) = game.player_idx(id) else {
            continue;
        };
        game.players[idx].accolade = if i == 0 {
            Accolade::ElPresidente
        } else if i == n - 1 {
            Accolade::Shithead
        } else if i == 1 {
            Accolade::VP
        } else {
            Accolade::Pleb
        };
    }
    for p in &mut game.players {
        if !game.results.contains(&p.id) {
            p.accolade = Accolade::Shithead;
        }
    }
}

/// Claim a parked trade card. `presidente` takes the forfeited high card,
/// `shithead` the low card. When both sides have claimed, play begins with
/// the 3♣ holder leading.
pub fn apply_claim_trade(
    game: &mut Game,
    player_id: &str,
    role: TradeRole,
) -> Result<(), GameError> {
    if game.phase != GamePhase::Trading {
        return Err(GameError::NotTradingPhase);
    }
    let ep_idx = game
        .players
        .iter()
        .position(|p| p.past_accolade == Accolade::ElPresidente);
    let sh_idx = game
        .players
        .iter()
        .position(|p| p.past_accolade == Accolade::Shithead);
    let (Some(ep_idx), Some(sh_idx)) = (ep_idx, sh_idx) else {
        return Err(GameError::NoTradeInProgress);
    };
    let player_idx = game.player_idx(player_id).ok_or(GameError::NotInGame)?;

    match role {
        TradeRole::Presidente => {
            if player_idx != ep_idx {
                return Err(GameError::NotElPresidente);
            }
            if game.trade_ep_claimed {
                return Err(GameError::AlreadyClaimed);
            }
            let card = game.trade_high_card.take().ok_or(GameError::NoCardToClaim)?;
            game.players[ep_idx].hand.push(card);
            game.players[ep_idx].sort_hand();
            game.trade_ep_claimed = true;
        }
        TradeRole::Shithead => {
            if player_idx != sh_idx {
                return Err(GameError::NotShithead);
            }
            if game.trade_sh_claimed {
                return Err(GameError::AlreadyClaimed);
            }
            let card = game.trade_low_card.take().ok_or(GameError::NoCardToClaim)?;
            game.players[sh_idx].hand.push(card);
            game.players[sh_idx].sort_hand();
            game.trade_sh_claimed = true;
        }
    }

    if game.trade_ep_claimed && game.trade_sh_claimed {
        game.phase = GamePhase::Playing;
        seed_opening_player(game);
        info!(
            leader = %game.players[game.current_player_idx].name,
            "Trade complete; round started"
        );
    }
    Ok(())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TradeRole {
    Presidente,
    Shithead,
}

/// Eject a player mid-game. Their cards vanish (they are not placed on the
/// pile) and every stored index shifts to the post-removal numbering. If the
/// ejected player was acting, the next seat in circular order acts. Returns
/// `true` when the ejection ended the game (fewer than two players left).
pub fn remove_player_from_game(game: &mut Game, player_idx: usize) -> bool {
    let n = game.players.len();
    if player_idx >= n {
        return false;
    }
    let removed = game.players.remove(player_idx);
    let was_trading = game.phase == GamePhase::Trading;

    let shift = |i: usize| -> Option<usize> {
        use std::cmp::Ordering;
        match i.cmp(&player_idx) {
            Ordering::Less => Some(i),
            Ordering::Equal => None,
            Ordering::Greater => Some(i - 1),
        }
    };

    let nn = game.players.len();
    if nn == 0 {
        return true;
    }

    game.current_player_idx = match shift(game.current_player_idx) {
        Some(i) if i < nn => i,
        _ => {
            // It was the ejected player's turn: the next seat acts.
            let next_old = (player_idx + 1) % n;
            let mut idx = shift(next_old).unwrap_or(0);
            if idx >= nn {
                idx = 0;
            }
            idx
        }
    };
    game.dealer_idx = shift(game.dealer_idx).unwrap_or(0);
    game.round.starting_player_idx = shift(game.round.starting_player_idx).unwrap_or(0);
    game.results.retain(|id| *id != removed.id);
    game.passed_this_round = game
        .passed_this_round
        .iter()
        .filter_map(|&i| shift(i))
        .collect();
    game.round.last_play_player_idx = game.round.last_play_player_idx.and_then(shift);

    if was_trading {
        abort_trade_if_principal_left(game, &removed);
    }

    if game.players.len() < MIN_PLAYERS {
        if game.players.len() == 1 {
            let id = game.players[0].id.clone();
            game.results.push(id);
        }
        assign_accolades(game);
        return true;
    }
    false
}

/// Mid-Trading eviction of a trading principal: their incoming card vanishes
/// with the dropped hand, the surviving principal auto-claims theirs and
/// play begins.
fn abort_trade_if_principal_left(game: &mut Game, removed: &Player) {
    let was_ep = removed.past_accolade == Accolade::ElPresidente;
    let was_sh = removed.past_accolade == Accolade::Shithead;
    if !was_ep && !was_sh {
        return;
    }

    if was_ep {
        // The high card was parked for the departed El Presidente.
        game.trade_high_card = None;
        game.trade_ep_claimed = true;
        if let Some(card) = game.trade_low_card.take() {
            if let Some(sh) = game
                .players
                .iter_mut()
                .find(|p| p.past_accolade == Accolade::Shithead)
            {
                sh.hand.push(card);
                sh.sort_hand();
            }
        }
        game.trade_sh_claimed = true;
    } else {
        game.trade_low_card = None;
        game.trade_sh_claimed = true;
        if let Some(card) = game.trade_high_card.take() {
            if let Some(ep) = game
                .players
                .iter_mut()
                .find(|p| p.past_accolade == Accolade::ElPresidente)
            {
                ep.hand.push(card);
                ep.sort_hand();
            }
        }
        game.trade_ep_claimed = true;
    }

    game.phase = GamePhase::Playing;
    seed_opening_player(game);
    info!("Trade aborted after a principal left; play begins");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::{Rank, Rank::*, Suit, Suit::*, THREE_OF_CLUBS};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn play(cards: &[(Rank, Suit)]) -> Play {
        Play::new(cards.iter().map(|&(r, s)| card(r, s)).collect())
    }

    /// Hand-built game in the Playing phase with the given hands, seat 0's
    /// 3♣-holder rule applied.
    fn game_with_hands(hands: Vec<Vec<Card>>) -> Game {
        let players: Vec<Player> = hands
            .into_iter()
            .enumerate()
            .map(|(i, mut hand)| {
                hand.sort();
                Player {
                    id: format!("p{i}"),
                    name: format!("Player {i}"),
                    past_accolade: Accolade::Pleb,
                    accolade: Accolade::Pleb,
                    hand,
                }
            })
            .collect();
        let mut game = Game {
            dealer_idx: 0,
            current_player_idx: 0,
            players,
            round: GameRound::new(0),
            phase: GamePhase::Playing,
            results: Vec::new(),
            passed_this_round: Default::default(),
            rounds_completed: 0,
            trade_high_card: None,
            trade_low_card: None,
            trade_ep_claimed: false,
            trade_sh_claimed: false,
        };
        seed_opening_player(&mut game);
        game
    }

    #[test]
    fn opening_play_must_include_three_of_clubs() {
        // S1: seat 0 holds the 3C and must lead with it.
        let mut game = game_with_hands(vec![
            vec![THREE_OF_CLUBS, card(Four, Clubs), card(Nine, Hearts)],
            vec![card(Five, Diamonds), card(Ten, Spades)],
            vec![card(Six, Clubs), card(Jack, Hearts)],
        ]);
        assert_eq!(game.current_player_idx, 0);

        let err = apply_play(&mut game, 0, &play(&[(Four, Clubs)])).unwrap_err();
        assert_eq!(err, GameError::MustOpenWithThreeOfClubs);
        assert_eq!(err.to_string(), "Must play 3C in first play");
        assert_eq!(game.players[0].hand.len(), 3);

        apply_play(&mut game, 0, &play(&[(Three, Clubs)])).unwrap();
        assert_eq!(game.round.pile.plays, vec![play(&[(Three, Clubs)])]);
        assert_eq!(game.current_player_idx, 1);
    }

    #[test]
    fn beating_and_pass_cascade_closes_the_round() {
        // S2: B beats a pair of fives, C and A pass, B leads the next round.
        let mut game = game_with_hands(vec![
            vec![THREE_OF_CLUBS, card(Nine, Hearts)],
            vec![card(Seven, Clubs), card(Seven, Diamonds), card(King, Spades)],
            vec![card(Six, Clubs), card(Jack, Hearts)],
        ]);
        // Put the round mid-trick: A led a pair of fives somehow earlier.
        game.rounds_completed = 1;
        game.round.pile.add_play(play(&[(Five, Diamonds), (Five, Hearts)]));
        game.round.last_play_player_idx = Some(0);
        game.current_player_idx = 1;

        apply_play(&mut game, 1, &play(&[(Seven, Clubs), (Seven, Diamonds)])).unwrap();
        assert_eq!(game.current_player_idx, 2);
        apply_pass(&mut game, 2).unwrap();
        assert_eq!(game.current_player_idx, 0);
        apply_pass(&mut game, 0).unwrap();

        // Round over: pile clear, B leads.
        assert!(game.round.pile.plays.is_empty());
        assert_eq!(game.round.last_play_player_idx, None);
        assert!(game.passed_this_round.is_empty());
        assert_eq!(game.current_player_idx, 1);
        assert_eq!(game.round.starting_player_idx, 1);
    }

    #[test]
    fn pass_does_not_close_the_trick_until_the_full_cycle() {
        // S3: a landed play reopens the trick for everyone still in.
        let mut game = game_with_hands(vec![
            vec![THREE_OF_CLUBS, card(Nine, Spades)],
            vec![card(Jack, Spades), card(Four, Hearts)],
            vec![card(Six, Clubs), card(Six, Diamonds)],
            vec![card(Two, Clubs), card(Eight, Hearts)],
        ]);
        game.rounds_completed = 1;
        game.current_player_idx = 0;
        game.round.starting_player_idx = 0;

        apply_play(&mut game, 0, &play(&[(Nine, Spades)])).unwrap();
        apply_play(&mut game, 1, &play(&[(Jack, Spades)])).unwrap();
        apply_pass(&mut game, 2).unwrap();
        apply_play(&mut game, 3, &play(&[(Two, Clubs)])).unwrap();
        // D's play reopened the trick: C is no longer marked passed.
        assert!(game.passed_this_round.is_empty());

        apply_pass(&mut game, 0).unwrap();
        apply_pass(&mut game, 1).unwrap();
        apply_pass(&mut game, 2).unwrap();

        // Everyone else passed: D won the round and leads.
        assert!(game.round.pile.plays.is_empty());
        assert_eq!(game.current_player_idx, 3);
        assert_eq!(game.round.starting_player_idx, 3);
    }

    #[test]
    fn play_clears_passed_set() {
        let mut game = game_with_hands(vec![
            vec![THREE_OF_CLUBS, card(Nine, Spades)],
            vec![card(Jack, Spades), card(Four, Hearts)],
            vec![card(Queen, Clubs), card(Six, Diamonds)],
        ]);
        game.rounds_completed = 1;
        apply_play(&mut game, 0, &play(&[(Nine, Spades)])).unwrap();
        apply_pass(&mut game, 1).unwrap();
        assert!(game.passed_this_round.contains(&1));
        apply_play(&mut game, 2, &play(&[(Queen, Clubs)])).unwrap();
        assert!(game.passed_this_round.is_empty());
    }

    #[test]
    fn rejects_out_of_turn_and_unowned_cards() {
        let mut game = game_with_hands(vec![
            vec![THREE_OF_CLUBS, card(Nine, Spades)],
            vec![card(Jack, Spades), card(Four, Hearts)],
        ]);
        assert_eq!(
            apply_play(&mut game, 1, &play(&[(Jack, Spades)])),
            Err(GameError::NotYourTurn)
        );
        assert_eq!(
            apply_pass(&mut game, 1),
            Err(GameError::NotYourTurn)
        );
        let before = game.players[0].hand.clone();
        assert_eq!(
            apply_play(&mut game, 0, &play(&[(Three, Clubs), (Three, Hearts)])),
            Err(GameError::CardNotInHand)
        );
        assert_eq!(game.players[0].hand, before);
    }

    #[test]
    fn going_out_appends_to_results_and_game_finishes() {
        let mut game = game_with_hands(vec![
            vec![THREE_OF_CLUBS],
            vec![card(Jack, Spades), card(Four, Hearts)],
            vec![card(Queen, Clubs)],
        ]);
        apply_play(&mut game, 0, &play(&[(Three, Clubs)])).unwrap();
        assert_eq!(game.results, vec!["p0".to_string()]);
        assert!(!finish_if_over(&mut game));

        apply_play(&mut game, 1, &play(&[(Jack, Spades)])).unwrap();
        apply_play(&mut game, 2, &play(&[(Queen, Clubs)])).unwrap();
        assert_eq!(game.results, vec!["p0".to_string(), "p2".to_string()]);

        assert!(finish_if_over(&mut game));
        assert_eq!(
            game.results,
            vec!["p0".to_string(), "p2".to_string(), "p1".to_string()]
        );
        assert_eq!(game.players[0].accolade, Accolade::ElPresidente);
        assert_eq!(game.players[2].accolade, Accolade::VP);
        assert_eq!(game.players[1].accolade, Accolade::Shithead);
    }

    #[test]
    fn accolades_cover_every_finish_position() {
        let mut game = game_with_hands(vec![
            vec![card(Four, Clubs)],
            vec![card(Five, Clubs)],
            vec![card(Six, Clubs)],
            vec![card(Seven, Clubs)],
            vec![card(Eight, Clubs)],
        ]);
        game.results = vec!["p3", "p1", "p4", "p0", "p2"]
            .into_iter()
            .map(String::from)
            .collect();
        assign_accolades(&mut game);
        assert_eq!(game.players[3].accolade, Accolade::ElPresidente);
        assert_eq!(game.players[1].accolade, Accolade::VP);
        assert_eq!(game.players[4].accolade, Accolade::Pleb);
        assert_eq!(game.players[0].accolade, Accolade::Pleb);
        assert_eq!(game.players[2].accolade, Accolade::Shithead);
    }

    #[test]
    fn ejected_player_is_shithead() {
        let mut game = game_with_hands(vec![
            vec![card(Four, Clubs)],
            vec![card(Five, Clubs)],
            vec![card(Six, Clubs)],
        ]);
        game.results = vec!["p1".to_string(), "p0".to_string()];
        // p2 never finished (ejected before game end).
        assign_accolades(&mut game);
        assert_eq!(game.players[2].accolade, Accolade::Shithead);
    }

    #[test]
    fn ejection_renumbers_indices() {
        // S5: four players, A acting; eject B.
        let mut game = game_with_hands(vec![
            vec![THREE_OF_CLUBS, card(Nine, Spades)],
            vec![card(Jack, Spades)],
            vec![card(Queen, Clubs), card(Six, Diamonds)],
            vec![card(King, Hearts)],
        ]);
        game.current_player_idx = 0;
        game.round.starting_player_idx = 0;
        game.passed_this_round.insert(2);
        game.round.last_play_player_idx = Some(3);

        let ended = remove_player_from_game(&mut game, 1);
        assert!(!ended);
        assert_eq!(game.players.len(), 3);
        assert_eq!(game.current_player_idx, 0);
        assert_eq!(game.players[1].id, "p2");
        assert_eq!(game.players[2].id, "p3");
        assert!(game.passed_this_round.contains(&1));
        assert!(!game.passed_this_round.contains(&2));
        assert_eq!(game.round.last_play_player_idx, Some(2));
    }

    #[test]
    fn ejecting_the_acting_player_passes_the_turn_on() {
        let mut game = game_with_hands(vec![
            vec![THREE_OF_CLUBS],
            vec![card(Jack, Spades)],
            vec![card(Queen, Clubs)],
        ]);
        game.current_player_idx = 1;
        let ended = remove_player_from_game(&mut game, 1);
        assert!(!ended);
        // Old seat 2 became seat 1 and acts.
        assert_eq!(game.current_player_idx, 1);
        assert_eq!(game.players[1].id, "p2");
    }

    #[test]
    fn ejection_below_two_players_ends_the_game() {
        let mut game = game_with_hands(vec![
            vec![THREE_OF_CLUBS],
            vec![card(Jack, Spades)],
        ]);
        let ended = remove_player_from_game(&mut game, 0);
        assert!(ended);
        assert_eq!(game.results, vec!["p1".to_string()]);
        assert_eq!(game.players[0].accolade, Accolade::ElPresidente);
    }

    #[test]
    fn trading_parks_the_right_cards() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        let mut roster: Vec<Player> = (0..4)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}")))
            .collect();
        roster[0].past_accolade = Accolade::ElPresidente;
        roster[3].past_accolade = Accolade::Shithead;

        let game = start_new_game(&roster, Some(1), Some("p0"), Some("p3"), &mut rng).unwrap();
        assert_eq!(game.phase, GamePhase::Trading);
        assert_eq!(game.dealer_idx, 2);

        let high = game.trade_high_card.unwrap();
        let low = game.trade_low_card.unwrap();
        // High came off the Shithead's hand, low off El Presidente's.
        assert!(game.players[3].hand.iter().all(|c| *c < high));
        assert!(!low.is_three_of_clubs());
        assert!(game.players[0]
            .hand
            .iter()
            .filter(|c| !c.is_three_of_clubs())
            .all(|c| *c > low));
        assert!(!game.trade_ep_claimed);
        assert!(!game.trade_sh_claimed);

        // Conservation: parked cards still counted.
        assert_eq!(game.cards_in_play(), 52);
    }

    #[test]
    fn claims_complete_the_trade_and_seed_the_opener() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(9);
        let mut roster: Vec<Player> = (0..3)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}")))
            .collect();
        roster[1].past_accolade = Accolade::ElPresidente;
        roster[2].past_accolade = Accolade::Shithead;
        let mut game = start_new_game(&roster, None, Some("p1"), Some("p2"), &mut rng).unwrap();

        assert_eq!(
            apply_claim_trade(&mut game, "p0", TradeRole::Presidente),
            Err(GameError::NotElPresidente)
        );
        apply_claim_trade(&mut game, "p1", TradeRole::Presidente).unwrap();
        assert_eq!(
            apply_claim_trade(&mut game, "p1", TradeRole::Presidente),
            Err(GameError::AlreadyClaimed)
        );
        assert_eq!(game.phase, GamePhase::Trading);

        apply_claim_trade(&mut game, "p2", TradeRole::Shithead).unwrap();
        assert_eq!(game.phase, GamePhase::Playing);
        let opener = game.current_player_idx;
        assert!(game.players[opener].holds_three_of_clubs());
        assert_eq!(game.cards_in_play(), 52);
    }

    #[test]
    fn evicting_a_trading_principal_aborts_the_trade() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(21);
        let mut roster: Vec<Player> = (0..4)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}")))
            .collect();
        roster[0].past_accolade = Accolade::ElPresidente;
        roster[1].past_accolade = Accolade::Shithead;
        let mut game = start_new_game(&roster, None, Some("p0"), Some("p1"), &mut rng).unwrap();

        let low = game.trade_low_card.unwrap();
        let sh_hand_before = game.players[1].hand.len();

        let ended = remove_player_from_game(&mut game, 0);
        assert!(!ended);
        assert_eq!(game.phase, GamePhase::Playing);
        // The Shithead auto-claimed the low card; the high card vanished
        // with the departed hand.
        assert!(game.trade_high_card.is_none());
        assert!(game.trade_low_card.is_none());
        assert_eq!(game.players[0].hand.len(), sh_hand_before + 1);
        assert!(game.players[0].hand.contains(&low));
    }

    #[test]
    fn two_player_game_rejects_bad_counts() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
        let one: Vec<Player> = vec![Player::new("p0", "solo")];
        assert_eq!(
            start_new_game(&one, None, None, None, &mut rng),
            Err(GameError::PlayerCount)
        );
        let eight: Vec<Player> = (0..8)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}")))
            .collect();
        assert_eq!(
            start_new_game(&eight, None, None, None, &mut rng),
            Err(GameError::PlayerCount)
        );
    }
}
