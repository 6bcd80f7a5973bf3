use klaverjas::game::{Card, Game, Rank, Seat, Suit};
use strum::IntoEnumIterator;

// ============================================================================
// Card Creation Macro
// ============================================================================

#[macro_export]
macro_rules! cards {
    ($($rank:ident $suit:ident),* $(,)?) => {
        vec![$($crate::Card::new($crate::Rank::$rank, $crate::Suit::$suit)),*]
    };
}

// ============================================================================
// Game Setup Utilities
// ============================================================================

/// All eight cards of one suit, in rank order.
pub fn suit_hand(suit: Suit) -> Vec<Card> {
    Rank::iter().map(|rank| Card::new(rank, suit)).collect()
}

/// A fully scripted deal: seat 0 holds all spades, seat 1 all hearts,
/// seat 2 all clubs, seat 3 all diamonds. Seat 0 deals, so seat 1 picks
/// trump and leads.
pub fn suit_per_seat_game() -> Game {
    Game::with_hands(
        [
            suit_hand(Suit::Spades),
            suit_hand(Suit::Hearts),
            suit_hand(Suit::Clubs),
            suit_hand(Suit::Diamonds),
        ],
        Seat::ALL[0],
    )
}

/// Plays one full trick of the suit-per-seat deal: `leader` opens with
/// `rank` of its suit and the other three follow clockwise with the same
/// rank of theirs.
pub fn lead_full_trick(game: &mut Game, leader: Seat, rank: Rank) {
    let suits = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];
    let mut seat = leader;
    for _ in 0..4 {
        let card = Card::new(rank, suits[seat.index()]);
        game.play_card(seat, card).unwrap();
        seat = seat.next();
    }
}
