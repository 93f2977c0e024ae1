//! A play: one or more face-up cards of the same rank discarded onto the pile.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, Rank, Suit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub cards: Vec<Card>,
}

impl Play {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn rank(&self) -> Option<Rank> {
        self.cards.first().map(|c| c.rank)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn max_suit(&self) -> Option<Suit> {
        self.cards.iter().map(|c| c.suit).max()
    }

    /// Whether this play is stronger than `other`: higher rank, or the same
    /// rank and a higher maximum suit among the played cards.
    pub fn beats(&self, other: &Play) -> bool {
        if other.is_empty() {
            return true;
        }
        let (Some(rank), Some(other_rank)) = (self.rank(), other.rank()) else {
            return false;
        };
        if rank != other_rank {
            return rank > other_rank;
        }
        self.max_suit() > other.max_suit()
    }

    pub fn contains_three_of_clubs(&self) -> bool {
        self.cards.iter().any(Card::is_three_of_clubs)
    }
}
