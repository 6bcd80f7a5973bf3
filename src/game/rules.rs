//! Legal-move computation and trick-winner determination, Rotterdam rules.
//!
//! Everything here is a pure function over (hand, trick so far, trump); the
//! state machine in `core` owns whose turn it is and what has been played.

use crate::game::cards::{Card, Rank, Suit};
use crate::game::round::TrickPlay;
use crate::game::seat::Seat;
use crate::shared::GameError;

/// Strength of a rank inside the trump suit, higher wins.
/// Order high to low: J, 9, A, 10, K, Q, 8, 7.
pub fn trump_strength(rank: Rank) -> u8 {
    match rank {
        Rank::Jack => 7,
        Rank::Nine => 6,
        Rank::Ace => 5,
        Rank::Ten => 4,
        Rank::King => 3,
        Rank::Queen => 2,
        Rank::Eight => 1,
        Rank::Seven => 0,
    }
}

/// Strength of a rank outside the trump suit, higher wins.
/// Order high to low: A, 10, K, Q, J, 9, 8, 7.
pub fn plain_strength(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 7,
        Rank::Ten => 6,
        Rank::King => 5,
        Rank::Queen => 4,
        Rank::Jack => 3,
        Rank::Nine => 2,
        Rank::Eight => 1,
        Rank::Seven => 0,
    }
}

/// The exact set of cards the holder of `hand` may play onto `trick`.
///
/// Rotterdam variant: a player who cannot follow suit must trump if able,
/// even when their partner currently holds the trick, and must over-trump
/// when holding a trump above the strongest one already played.
pub fn legal_moves(hand: &[Card], trick: &[TrickPlay], trump: Suit) -> Vec<Card> {
    let Some(first) = trick.first() else {
        // Leading: anything goes.
        return hand.to_vec();
    };
    let led_suit = first.card.suit;

    // Following suit dominates every trump rule.
    let follows: Vec<Card> = hand.iter().copied().filter(|c| c.suit == led_suit).collect();
    if !follows.is_empty() {
        return follows;
    }

    let trumps: Vec<Card> = hand.iter().copied().filter(|c| c.suit == trump).collect();
    if trumps.is_empty() {
        return hand.to_vec();
    }

    let strongest_played = trick
        .iter()
        .filter(|p| p.card.suit == trump)
        .map(|p| trump_strength(p.card.rank))
        .max();

    match strongest_played {
        None => trumps,
        Some(best) => {
            let over: Vec<Card> = trumps
                .iter()
                .copied()
                .filter(|c| trump_strength(c.rank) > best)
                .collect();
            if over.is_empty() {
                // Under-trumping is allowed when over-trumping is impossible.
                trumps
            } else {
                over
            }
        }
    }
}

/// The seat that takes a completed (or partial, for verzaakt analysis)
/// trick. Only trump cards and led-suit cards compete; a trump always beats
/// the led suit.
pub fn trick_winner(trick: &[TrickPlay], trump: Suit) -> Result<Seat, GameError> {
    let first = trick.first().ok_or(GameError::EmptyTrick)?;
    let led_suit = first.card.suit;

    let best_trump = trick
        .iter()
        .filter(|p| p.card.suit == trump)
        .max_by_key(|p| trump_strength(p.card.rank));
    if let Some(play) = best_trump {
        return Ok(play.seat);
    }

    // No trump played; the led suit decides. The first card always has the
    // led suit, so the max exists.
    let winner = trick
        .iter()
        .filter(|p| p.card.suit == led_suit)
        .max_by_key(|p| plain_strength(p.card.rank))
        .expect("trick contains at least the led card");
    Ok(winner.seat)
}
