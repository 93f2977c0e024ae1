//! Legal-play predicate and enumeration.

use std::collections::BTreeMap;

use crate::domain::cards::{Card, Rank};
use crate::domain::play::Play;

/// Whether `play` may land on top of `current`.
///
/// All cards must share one rank. Against a non-empty current play the count
/// must match and the play must beat it. When leading, `num_cards_required`
/// (if supplied by the caller) pins the count; otherwise any count goes.
pub fn is_valid_play(play: &Play, current: Option<&Play>, num_cards_required: Option<usize>) -> bool {
    let Some(rank) = play.rank() else {
        return false;
    };
    if !play.cards.iter().all(|c| c.rank == rank) {
        return false;
    }

    match current {
        Some(current) if !current.is_empty() => {
            play.len() == current.len() && play.beats(current)
        }
        _ => match num_cards_required {
            Some(n) => play.len() == n,
            None => true,
        },
    }
}

/// Enumerate every legal play from `hand` against `current`.
///
/// Groups the hand by rank and emits each n-card same-rank combination that
/// passes the predicate (and the opening-3♣ requirement when
/// `must_include_3c`). When leading a new trick and nothing qualified, falls
/// back to every same-rank combination of any size so the opening lead can
/// never come up empty.
pub fn valid_plays(
    hand: &[Card],
    current: Option<&Play>,
    num_required: Option<usize>,
    must_include_3c: bool,
) -> Vec<Vec<Card>> {
    if hand.is_empty() {
        return Vec::new();
    }
    let pile_empty = current.map_or(true, Play::is_empty);

    let mut by_rank: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
    for &c in hand {
        by_rank.entry(c.rank).or_default().push(c);
    }
    for cards in by_rank.values_mut() {
        cards.sort();
    }

    let n = current
        .filter(|c| !c.is_empty())
        .map(Play::len)
        .or(num_required);

    let mut result = Vec::new();
    for cards in by_rank.values() {
        match n {
            Some(n) => {
                if cards.len() < n {
                    continue;
                }
                if must_include_3c && !cards.iter().any(Card::is_three_of_clubs) {
                    continue;
                }
                for combo in combinations(cards, n) {
                    if must_include_3c && !combo.iter().any(Card::is_three_of_clubs) {
                        continue;
                    }
                    if is_valid_play(&Play::new(combo.clone()), current, num_required) {
                        result.push(combo);
                    }
                }
            }
            None => {
                for k in 1..=cards.len() {
                    for combo in combinations(cards, k) {
                        if must_include_3c && !combo.iter().any(Card::is_three_of_clubs) {
                            continue;
                        }
                        if is_valid_play(&Play::new(combo.clone()), current, num_required) {
                            result.push(combo);
                        }
                    }
                }
            }
        }
    }

    // Opening-lead fallback: never leave the leader without a move.
    if pile_empty && result.is_empty() {
        for cards in by_rank.values() {
            for k in 1..=cards.len() {
                result.extend(combinations(cards, k));
            }
        }
    }

    result
}

/// All k-card combinations of `cards`, preserving order.
fn combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if k > cards.len() {
        return Vec::new();
    }
    let mut result = Vec::new();
    for (i, &c) in cards.iter().enumerate() {
        for mut rest in combinations(&cards[i + 1..], k - 1) {
            rest.insert(0, c);
            result.push(rest);
        }
    }
    result
}
