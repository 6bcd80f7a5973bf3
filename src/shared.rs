use thiserror::Error;

use crate::game::cards::Card;
use crate::game::core::Phase;
use crate::game::seat::Seat;
use crate::store::StoreError;

/// Every expected, recoverable failure a game operation can produce.
///
/// Rule violations and collaborator failures are both modeled as explicit
/// results so the sync layer can decide whether to surface a message or
/// retry; nothing in the engine panics for these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("no active round")]
    NoActiveRound,

    #[error("action is not valid in phase {0:?}")]
    WrongPhase(Phase),

    #[error("seat {seat} acted but seat {expected} is to act")]
    NotYourTurn { seat: Seat, expected: Seat },

    #[error("card {0} is not in the acting seat's hand")]
    CardNotInHand(Card),

    #[error("card {0} is not a legal move")]
    IllegalMove(Card),

    #[error("roem claim does not match the claimed cards")]
    InvalidRoemClaim,

    #[error("verzaakt needs at least two cards on the table")]
    InsufficientPriorPlay,

    #[error("deck has {have} cards, 32 required to deal")]
    InsufficientCards { have: usize },

    #[error("cannot determine a winner for an empty trick")]
    EmptyTrick,

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("lobby {0} already has four players")]
    LobbyFull(String),

    #[error("lobby {0} needs four players to start")]
    LobbyNotReady(String),

    #[error("game document is malformed: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
