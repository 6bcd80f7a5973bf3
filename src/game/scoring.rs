//! Card points and round settlement: nat, pit and verzaakt.

use crate::game::cards::{Card, Rank, Suit};

/// Base card points in a round, before the last-trick bonus.
pub const BASE_POINTS: u32 = 152;

/// Bonus for taking the eighth trick.
pub const LAST_TRICK_BONUS: u32 = 10;

/// Base points plus the last-trick bonus: what a full round always splits.
pub const ROUND_POINTS: u32 = BASE_POINTS + LAST_TRICK_BONUS;

/// Bonus for winning all eight tricks ("pit").
pub const PIT_BONUS: u32 = 100;

/// Point value of a single card given the trump suit.
pub fn card_points(card: Card, trump: Suit) -> u32 {
    if card.suit == trump {
        match card.rank {
            Rank::Jack => 20,
            Rank::Nine => 14,
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Eight | Rank::Seven => 0,
        }
    } else {
        match card.rank {
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
            Rank::Nine | Rank::Eight | Rank::Seven => 0,
        }
    }
}

/// Sum of card points over a trick (or any card set).
pub fn trick_points(cards: &[Card], trump: Suit) -> u32 {
    cards.iter().map(|&c| card_points(c, trump)).sum()
}

/// The strict-majority threshold the playing team must reach.
///
/// All roem claimed in the round inflates the denominator; the team needs
/// strictly more than half of (162 + total roem). With no roem: 82.
pub fn majority_threshold(total_roem: u32) -> u32 {
    (ROUND_POINTS + total_roem) / 2 + 1
}

/// Which side committed a proven illegal move, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerzaaktBy {
    PlayingTeam,
    DefendingTeam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundInput {
    pub playing_points: u32,
    pub defending_points: u32,
    pub playing_roem: u32,
    pub defending_roem: u32,
    pub playing_tricks: u8,
    pub verzaakt: Option<VerzaaktBy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoundOutcome {
    pub playing_score: u32,
    pub defending_score: u32,
    pub nat: bool,
    pub pit: bool,
}

/// Settles a completed (or verzaakt-terminated) round into final scores.
///
/// Verzaakt forfeits everything the guilty team accrued: the other side
/// receives the full 162 plus all committed roem of both teams. Otherwise
/// the playing team goes "nat" when its raw trick points (roem excluded)
/// stay below the majority threshold, and earns the pit bonus for a clean
/// sweep of all eight tricks.
pub fn round_result(input: RoundInput) -> RoundOutcome {
    let total_roem = input.playing_roem + input.defending_roem;

    if let Some(guilty) = input.verzaakt {
        let sweep = ROUND_POINTS + total_roem;
        return match guilty {
            VerzaaktBy::PlayingTeam => RoundOutcome {
                playing_score: 0,
                defending_score: sweep,
                nat: false,
                pit: false,
            },
            VerzaaktBy::DefendingTeam => RoundOutcome {
                playing_score: sweep,
                defending_score: 0,
                nat: false,
                pit: false,
            },
        };
    }

    // Only base card points count toward the pass test.
    if input.playing_points < majority_threshold(total_roem) {
        return RoundOutcome {
            playing_score: 0,
            defending_score: ROUND_POINTS + total_roem,
            nat: true,
            pit: false,
        };
    }

    let pit = input.playing_tricks == 8;
    let playing_score =
        input.playing_points + input.playing_roem + if pit { PIT_BONUS } else { 0 };
    let defending_score = input.defending_points + input.defending_roem;

    if !pit {
        debug_assert_eq!(
            playing_score + defending_score - total_roem,
            ROUND_POINTS,
            "non-roem points of a settled round must sum to 162"
        );
    }

    RoundOutcome {
        playing_score,
        defending_score,
        nat: false,
        pit,
    }
}
