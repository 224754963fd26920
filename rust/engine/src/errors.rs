use thiserror::Error;

use crate::cards::Op;
use crate::game::Phase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Action not allowed in phase {phase:?}")]
    WrongPhase { phase: Phase },
    #[error("Unknown player id {0}")]
    UnknownPlayer(usize),
    #[error("A multiply discard choice is pending")]
    PendingDiscard,
    #[error("No multiply discard is pending")]
    NoPendingDiscard,
    #[error("Cannot discard {0:?}: not in the operator rack")]
    InvalidDiscard(Op),
    #[error("SWING declaration requires both a low and a high result")]
    IncompleteSwing,
    #[error("Player already folded")]
    AlreadyFolded,
    #[error("Deck exhausted while dealing")]
    DeckExhausted,
}
