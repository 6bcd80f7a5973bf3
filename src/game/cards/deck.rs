use rand::seq::SliceRandom;
use rand::Rng;

use super::basic::Card;
use crate::shared::GameError;

/// Number of cards each seat receives.
pub const HAND_SIZE: usize = 8;

/// Number of seats at the table.
pub const SEAT_COUNT: usize = 4;

/// Returns a shuffled copy of the deck. The input is left untouched so a
/// caller can re-deal from the same source deck.
pub fn shuffled<R: Rng + ?Sized>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut cards = deck.to_vec();
    cards.shuffle(rng);
    cards
}

/// Deals the first 32 cards into four sorted 8-card hands.
///
/// Fails with `InsufficientCards` rather than truncating when the deck is
/// short.
pub fn deal(deck: &[Card]) -> Result<[Vec<Card>; 4], GameError> {
    if deck.len() < HAND_SIZE * SEAT_COUNT {
        return Err(GameError::InsufficientCards { have: deck.len() });
    }

    let mut hands: [Vec<Card>; 4] = Default::default();
    for (seat, hand) in hands.iter_mut().enumerate() {
        let start = seat * HAND_SIZE;
        let mut cards: Vec<Card> = deck[start..start + HAND_SIZE].to_vec();
        cards.sort_by_key(|c| c.display_key());
        *hand = cards;
    }
    Ok(hands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shuffle_preserves_multiset_and_input() {
        let deck = Card::all_cards();
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled_deck = shuffled(&deck, &mut rng);

        assert_eq!(deck, Card::all_cards()); // input untouched

        let mut a = deck.clone();
        let mut b = shuffled_deck.clone();
        a.sort_by_key(|c| c.display_key());
        b.sort_by_key(|c| c.display_key());
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffles_diverge_across_seeds() {
        let deck = Card::all_cards();
        let a = shuffled(&deck, &mut StdRng::seed_from_u64(1));
        let b = shuffled(&deck, &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_deal_partitions_deck() {
        let deck = shuffled(&Card::all_cards(), &mut StdRng::seed_from_u64(42));
        let hands = deal(&deck).unwrap();

        let mut dealt: Vec<Card> = hands.iter().flatten().copied().collect();
        assert_eq!(dealt.len(), 32);
        for hand in &hands {
            assert_eq!(hand.len(), 8);
        }

        let mut all = Card::all_cards();
        dealt.sort_by_key(|c| c.display_key());
        all.sort_by_key(|c| c.display_key());
        assert_eq!(dealt, all);
    }

    #[test]
    fn test_deal_fails_loudly_on_short_deck() {
        let deck = &Card::all_cards()[..31];
        match deal(deck) {
            Err(GameError::InsufficientCards { have }) => assert_eq!(have, 31),
            other => panic!("expected InsufficientCards, got {:?}", other),
        }
    }

    #[test]
    fn test_dealt_hands_are_sorted_for_display() {
        let deck = shuffled(&Card::all_cards(), &mut StdRng::seed_from_u64(3));
        let hands = deal(&deck).unwrap();
        for hand in &hands {
            let mut sorted = hand.clone();
            sorted.sort_by_key(|c| c.display_key());
            assert_eq!(*hand, sorted);
        }
    }
}
