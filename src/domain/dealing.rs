//! Deck construction and dealing.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::cards::{Card, RANKS, SUITS};
use crate::domain::state::Player;

/// Full 52-card deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for rank in RANKS {
        for suit in SUITS {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// Shuffle a fresh deck with the caller's random source and deal it out.
///
/// For 3+ players the whole deck is dealt round-robin starting at seat 0.
/// For 2 players the deal cycles (p0, p1, withhold) so 17 cards stay out of
/// play — unless the withheld slot would drop the 3♣, which is dealt to the
/// player whose turn in the pattern it is (the 3♣ anchors the opening lead).
/// Hands come back sorted ascending by card value.
pub fn deal<R: Rng + ?Sized>(players: &mut [Player], rng: &mut R) {
    let n = players.len();
    debug_assert!((2..=7).contains(&n));

    let mut deck = full_deck();
    deck.shuffle(rng);

    if n == 2 {
        let mut seat = 0usize;
        for (slot, card) in deck.into_iter().enumerate() {
            let withhold = slot % 3 == 2;
            if withhold && !card.is_three_of_clubs() {
                continue;
            }
            players[seat % 2].hand.push(card);
            seat += 1;
        }
    } else {
        for (i, card) in deck.into_iter().enumerate() {
            players[i % n].hand.push(card);
        }
    }

    for p in players {
        p.sort_hand();
    }
}
