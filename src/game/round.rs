//! Round state: the live trick, the trick log, per-team accumulators and
//! the hand snapshots that make retroactive verzaakt detection possible.

use serde::{Deserialize, Serialize};

use crate::game::cards::Card;
use crate::game::rules;
use crate::game::seat::{Seat, Team};

/// A round always consists of exactly eight tricks.
pub const TRICKS_PER_ROUND: usize = 8;

/// One card laid into a trick by one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickPlay {
    pub seat: Seat,
    pub card: Card,
}

/// An archived trick, kept for majority counting and verzaakt analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub plays: Vec<TrickPlay>,
    pub winner: Seat,
    /// Roem committed to the winner's team when this trick was finalized.
    pub roem: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub base: u32,
    pub roem: u32,
}

/// Running point totals for both teams within one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScores {
    pub ns: TeamTotals,
    pub we: TeamTotals,
}

impl RoundScores {
    pub fn team(&self, team: Team) -> &TeamTotals {
        match team {
            Team::NorthSouth => &self.ns,
            Team::EastWest => &self.we,
        }
    }

    pub fn team_mut(&mut self, team: Team) -> &mut TeamTotals {
        match team {
            Team::NorthSouth => &mut self.ns,
            Team::EastWest => &mut self.we,
        }
    }
}

/// The first chronological illegal move of a round, if one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerzaaktOffense {
    pub seat: Seat,
    pub trick_index: usize,
    pub play_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub trump: Option<crate::game::cards::Suit>,
    pub trump_chooser: Seat,
    /// Team of the trump chooser, fixed once trump is set.
    pub playing_team: Option<Team>,
    pub current_player: Seat,
    pub hands: [Vec<Card>; 4],
    /// Exact hands at the instant each trick began, one entry per trick
    /// started so far. Verzaakt re-validation runs against these, not the
    /// already-reduced live hands.
    pub hand_snapshots: Vec<[Vec<Card>; 4]>,
    pub current_trick: Vec<TrickPlay>,
    pub completed_tricks: Vec<CompletedTrick>,
    pub scores: RoundScores,
    /// One roem claim slot per trick.
    pub roem_claimed: bool,
    /// Claimed roem waiting for the trick winner to be certain.
    pub pending_roem: u32,
}

impl Round {
    /// A freshly dealt round. Trump selection falls to the seat clockwise
    /// of the dealer.
    pub fn new(hands: [Vec<Card>; 4], dealer: Seat) -> Self {
        let trump_chooser = dealer.next();
        Self {
            trump: None,
            trump_chooser,
            playing_team: None,
            current_player: trump_chooser,
            hands,
            hand_snapshots: Vec::with_capacity(TRICKS_PER_ROUND),
            current_trick: Vec::with_capacity(4),
            completed_tricks: Vec::with_capacity(TRICKS_PER_ROUND),
            scores: RoundScores::default(),
            roem_claimed: false,
            pending_roem: 0,
        }
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat.index()]
    }

    /// A seat's hand plus its own cards already in the active trick: the
    /// card set a roem claim may draw from.
    pub fn available_cards(&self, seat: Seat) -> Vec<Card> {
        let mut cards = self.hands[seat.index()].clone();
        cards.extend(
            self.current_trick
                .iter()
                .filter(|p| p.seat == seat)
                .map(|p| p.card),
        );
        cards
    }

    pub fn tricks_won_by(&self, team: Team) -> u8 {
        self.completed_tricks
            .iter()
            .filter(|t| t.winner.team() == team)
            .count() as u8
    }

    /// Committed roem of both teams, pending roem excluded.
    pub fn total_committed_roem(&self) -> u32 {
        self.scores.ns.roem + self.scores.we.roem
    }

    /// Re-validates every move of the round, including the in-progress
    /// trick, against the hand snapshot of its trick. Returns the first
    /// offender by trick index, then play order.
    pub fn find_verzaakt(&self) -> Option<VerzaaktOffense> {
        let trump = self.trump?;

        let tricks = self
            .completed_tricks
            .iter()
            .map(|t| t.plays.as_slice())
            .chain(std::iter::once(self.current_trick.as_slice()));

        for (trick_index, plays) in tricks.enumerate() {
            let Some(snapshot) = self.hand_snapshots.get(trick_index) else {
                break;
            };
            let mut trick_so_far: Vec<TrickPlay> = Vec::with_capacity(4);
            for (play_index, play) in plays.iter().enumerate() {
                let hand = &snapshot[play.seat.index()];
                let legal = rules::legal_moves(hand, &trick_so_far, trump);
                if !legal.contains(&play.card) {
                    return Some(VerzaaktOffense {
                        seat: play.seat,
                        trick_index,
                        play_index,
                    });
                }
                trick_so_far.push(*play);
            }
        }
        None
    }
}
