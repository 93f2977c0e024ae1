//! Rule-violation reasons returned by the engine.
//!
//! These are user-visible: the coordinator forwards the Display text to the
//! offending client verbatim and never retries.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Need 2-7 players")]
    PlayerCount,
    #[error("Not in playing phase")]
    NotPlayingPhase,
    #[error("Not in trading phase")]
    NotTradingPhase,
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Invalid play")]
    InvalidPlay,
    #[error("Must play 3C in first play")]
    MustOpenWithThreeOfClubs,
    #[error("Card not in hand")]
    CardNotInHand,
    #[error("No cards specified")]
    EmptyPlay,
    #[error("You are not in this game")]
    NotInGame,
    #[error("No trade in progress")]
    NoTradeInProgress,
    #[error("Only El Presidente can claim the high card")]
    NotElPresidente,
    #[error("Only Shithead can claim the low card")]
    NotShithead,
    #[error("Already claimed")]
    AlreadyClaimed,
    #[error("No card to claim")]
    NoCardToClaim,
}
