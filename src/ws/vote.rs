//! Restart-vote tally.
//!
//! Pure bookkeeping; the room actor owns the 30-second timeout and the side
//! effects of a decision.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDecision {
    Passed,
    Rejected,
    Pending,
}

#[derive(Debug, Clone)]
pub struct RestartVote {
    pub initiator_id: String,
    votes: HashMap<String, bool>,
}

impl RestartVote {
    /// Open a vote; the initiator is counted as a yes.
    pub fn new(initiator_id: impl Into<String>) -> Self {
        let initiator_id = initiator_id.into();
        let mut votes = HashMap::new();
        votes.insert(initiator_id.clone(), true);
        Self {
            initiator_id,
            votes,
        }
    }

    /// Record a vote. A repeat vote by the same player overwrites.
    pub fn record(&mut self, player_id: &str, yes: bool) {
        self.votes.insert(player_id.to_string(), yes);
    }

    fn votes_needed(n: usize) -> usize {
        if n == 2 {
            2 // unanimity for head-to-head games
        } else {
            n.div_ceil(2)
        }
    }

    /// Tally against the eligible voters (the game's players).
    pub fn decide(&self, eligible: &[String]) -> VoteDecision {
        let n = eligible.len();
        let needed = Self::votes_needed(n);
        let yes = eligible
            .iter()
            .filter(|id| self.votes.get(*id) == Some(&true))
            .count();
        let no = eligible
            .iter()
            .filter(|id| self.votes.get(*id) == Some(&false))
            .count();

        if yes >= needed {
            VoteDecision::Passed
        } else if no > n - needed {
            VoteDecision::Rejected
        } else {
            VoteDecision::Pending
        }
    }

    /// Timeout tally: every missing vote counts as a no, which always
    /// produces a decision.
    pub fn decide_with_absent_as_no(&mut self, eligible: &[String]) -> VoteDecision {
        for id in eligible {
            self.votes.entry(id.clone()).or_insert(false);
        }
        self.decide(eligible)
    }
}
