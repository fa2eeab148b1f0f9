//! Caller-surfaced engine failures.
//!
//! Every variant is recoverable and carries enough context to render a
//! user-facing message. No transition partially mutates state before
//! returning one of these: validation always precedes mutation.

use thiserror::Error;

use crate::core::seat::InvalidDrawSource;
use crate::deck::DeckError;
use crate::scoring::DeclareVeto;
use crate::state::GameId;

/// Engine error taxonomy.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GameError {
    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("game is already completed")]
    GameAlreadyCompleted,

    #[error("not your turn")]
    NotPlayersTurn,

    #[error("action not legal in the current phase")]
    PhaseMismatch,

    #[error("invalid draw source, must be \"closed\" or \"open\"")]
    InvalidDrawSource,

    #[error("invalid card index {index} for a hand of {hand_size} cards")]
    InvalidCardIndex { index: usize, hand_size: usize },

    #[error("some cards are not in the hand")]
    CardsNotInHand,

    #[error("cards do not form a valid sequence or set")]
    InvalidMeld,

    #[error("cannot declare: {0}")]
    CannotDeclare(DeclareVeto),

    #[error("no cards left to draw")]
    DeckExhausted,

    #[error("the open pile is empty")]
    EmptyOpenDeck,
}

impl From<DeckError> for GameError {
    fn from(err: DeckError) -> Self {
        match err {
            DeckError::Exhausted => GameError::DeckExhausted,
            DeckError::EmptyOpen => GameError::EmptyOpenDeck,
        }
    }
}

impl From<InvalidDrawSource> for GameError {
    fn from(_: InvalidDrawSource) -> Self {
        GameError::InvalidDrawSource
    }
}

impl From<DeclareVeto> for GameError {
    fn from(veto: DeclareVeto) -> Self {
        GameError::CannotDeclare(veto)
    }
}
