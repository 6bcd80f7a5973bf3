//! Wire shape of the game inside the lobby document.
//!
//! The store holds plain JSON, so the in-memory [`Game`] is flattened into
//! a camelCase document: round fields sit beside the phase instead of
//! behind an inner object, matching how clients subscribe to individual
//! paths like `game/currentPlayer`. Nothing is skipped when null; an
//! absent field and a null field mean different things to the store.

use serde::{Deserialize, Serialize};

use crate::game::{
    Card, CompletedTrick, Game, GameScores, Notification, Phase, Round, RoundOutcome,
    RoundScores, Seat, Suit, Team, TrickPlay,
};
use crate::shared::GameError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    pub phase: Phase,
    pub round: u32,
    pub dealer: Seat,
    pub trump: Option<Suit>,
    pub trump_chooser: Option<Seat>,
    pub playing_team: Option<Team>,
    pub current_player: Option<Seat>,
    pub hands: Option<[Vec<Card>; 4]>,
    /// Hands as they stood when each trick opened, one entry per trick.
    pub hands_at_trick_start: Option<Vec<[Vec<Card>; 4]>>,
    pub current_trick: Option<Vec<TrickPlay>>,
    pub completed_tricks: Option<Vec<CompletedTrick>>,
    pub scores: Option<RoundScores>,
    pub roem_claimed: Option<bool>,
    pub roem_claim_pending: Option<u32>,
    pub game_scores: GameScores,
    pub last_round_outcome: Option<RoundOutcome>,
    pub last_notification: Option<Notification>,
}

impl From<&Game> for GameDocument {
    fn from(game: &Game) -> Self {
        let round = game.round.as_ref();
        Self {
            phase: game.phase,
            round: game.round_number,
            dealer: game.dealer,
            trump: round.and_then(|r| r.trump),
            trump_chooser: round.map(|r| r.trump_chooser),
            playing_team: round.and_then(|r| r.playing_team),
            current_player: round.map(|r| r.current_player),
            hands: round.map(|r| r.hands.clone()),
            hands_at_trick_start: round.map(|r| r.hand_snapshots.clone()),
            current_trick: round.map(|r| r.current_trick.clone()),
            completed_tricks: round.map(|r| r.completed_tricks.clone()),
            scores: round.map(|r| r.scores),
            roem_claimed: round.map(|r| r.roem_claimed),
            roem_claim_pending: round.map(|r| r.pending_roem),
            game_scores: game.game_scores,
            last_round_outcome: game.last_round_outcome,
            last_notification: game.last_notification,
        }
    }
}

impl TryFrom<GameDocument> for Game {
    type Error = GameError;

    /// Rebuilds the in-memory state. A document in any phase but
    /// `GameEnd` must carry the full round block; a partial one was
    /// written by a buggy or hostile client and is rejected.
    fn try_from(doc: GameDocument) -> Result<Self, Self::Error> {
        let round = if doc.phase == Phase::GameEnd {
            None
        } else {
            Some(rebuild_round(&doc)?)
        };
        Ok(Game {
            phase: doc.phase,
            round_number: doc.round,
            dealer: doc.dealer,
            round,
            game_scores: doc.game_scores,
            last_round_outcome: doc.last_round_outcome,
            last_notification: doc.last_notification,
        })
    }
}

fn rebuild_round(doc: &GameDocument) -> Result<Round, GameError> {
    let missing = |field: &str| GameError::InvalidDocument(format!("missing game field {field}"));
    Ok(Round {
        trump: doc.trump,
        trump_chooser: doc.trump_chooser.ok_or_else(|| missing("trumpChooser"))?,
        playing_team: doc.playing_team,
        current_player: doc.current_player.ok_or_else(|| missing("currentPlayer"))?,
        hands: doc.hands.clone().ok_or_else(|| missing("hands"))?,
        hand_snapshots: doc
            .hands_at_trick_start
            .clone()
            .ok_or_else(|| missing("handsAtTrickStart"))?,
        current_trick: doc.current_trick.clone().ok_or_else(|| missing("currentTrick"))?,
        completed_tricks: doc
            .completed_tricks
            .clone()
            .ok_or_else(|| missing("completedTricks"))?,
        scores: doc.scores.ok_or_else(|| missing("scores"))?,
        roem_claimed: doc.roem_claimed.ok_or_else(|| missing("roemClaimed"))?,
        pending_roem: doc.roem_claim_pending.ok_or_else(|| missing("roemClaimPending"))?,
    })
}
