//! Roem: bonus card combinations claimable during a trick.
//!
//! Detection is used to auto-suggest and price a claim; validation accepts
//! or rejects a claim a player submitted themselves. Combinations stack, so
//! the trump Q-K-A is worth a sequence *and* stuk at once.

use strum::IntoEnumIterator;

use crate::game::cards::{Card, Rank, Suit};

/// Ranks that score as a four-of-a-kind. Four sevens or eights carry no
/// point value and are not claimable.
const QUAD_RANKS: [Rank; 6] = [
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoemKind {
    SequenceThree,
    SequenceFour,
    Stuk,
    FourOfAKind,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoemClaim {
    pub kind: RoemKind,
    pub cards: Vec<Card>,
}

impl RoemClaim {
    pub fn points(&self) -> u32 {
        match self.kind {
            RoemKind::SequenceThree => 20,
            RoemKind::SequenceFour => 50,
            RoemKind::Stuk => 20,
            RoemKind::FourOfAKind => 100,
        }
    }
}

/// Everything roem found in a set of cards, stacking permitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoemDetection {
    pub claims: Vec<RoemClaim>,
    pub total: u32,
}

/// Finds maximal same-suit runs of consecutive sequence positions.
///
/// Sequence order is positional (7,8,9,10,J,Q,K,A), not play strength. A run
/// of four or more yields a single 50-point claim and no embedded 3-run; a
/// run of exactly three yields one 20-point claim.
pub fn detect_sequences(cards: &[Card]) -> Vec<RoemClaim> {
    let mut claims = Vec::new();

    for suit in Suit::iter() {
        let mut in_suit: Vec<Card> = cards.iter().copied().filter(|c| c.suit == suit).collect();
        in_suit.sort_by_key(|c| c.rank.sequence_position());
        in_suit.dedup();

        let mut run_start = 0;
        for i in 0..=in_suit.len() {
            let run_continues = i > 0
                && i < in_suit.len()
                && in_suit[i].rank.sequence_position()
                    == in_suit[i - 1].rank.sequence_position() + 1;
            if run_continues {
                continue;
            }
            let run = &in_suit[run_start..i];
            if run.len() >= 4 {
                // Runs longer than four still price as one 50-point claim;
                // the claim names the top four cards of the run.
                claims.push(RoemClaim {
                    kind: RoemKind::SequenceFour,
                    cards: run[run.len() - 4..].to_vec(),
                });
            } else if run.len() == 3 {
                claims.push(RoemClaim {
                    kind: RoemKind::SequenceThree,
                    cards: run.to_vec(),
                });
            }
            run_start = i;
        }
    }

    claims
}

/// King and queen of trump together: 20 points.
pub fn detect_stuk(cards: &[Card], trump: Suit) -> Option<RoemClaim> {
    let king = Card::new(Rank::King, trump);
    let queen = Card::new(Rank::Queen, trump);
    (cards.contains(&king) && cards.contains(&queen)).then(|| RoemClaim {
        kind: RoemKind::Stuk,
        cards: vec![queen, king],
    })
}

/// All four suits of one scoring rank: 100 points each.
pub fn detect_four_of_a_kind(cards: &[Card]) -> Vec<RoemClaim> {
    QUAD_RANKS
        .iter()
        .filter_map(|&rank| {
            let quad: Vec<Card> = Suit::iter()
                .map(|suit| Card::new(rank, suit))
                .filter(|c| cards.contains(c))
                .collect();
            (quad.len() == 4).then_some(RoemClaim {
                kind: RoemKind::FourOfAKind,
                cards: quad,
            })
        })
        .collect()
}

/// Union of all three detectors. Stacking is explicitly permitted: the same
/// card may appear in several claims.
pub fn detect_all_roem(cards: &[Card], trump: Suit) -> RoemDetection {
    let mut claims = detect_sequences(cards);
    if let Some(stuk) = detect_stuk(cards, trump) {
        claims.push(stuk);
    }
    claims.extend(detect_four_of_a_kind(cards));

    let total = claims.iter().map(RoemClaim::points).sum();
    RoemDetection { claims, total }
}

/// Accepts or rejects a player-submitted claim.
///
/// `available_cards` is the claimant's current hand plus any cards they
/// already put into the active trick. The declared kind and the claimed
/// cards must match exactly; claiming 20 for a four-run is rejected.
pub fn validate_roem_claim(claim: &RoemClaim, available_cards: &[Card], trump: Suit) -> bool {
    let mut seen: Vec<Card> = Vec::with_capacity(claim.cards.len());
    for card in &claim.cards {
        if seen.contains(card) || !available_cards.contains(card) {
            return false;
        }
        seen.push(*card);
    }

    match claim.kind {
        RoemKind::SequenceThree => is_run_of(&claim.cards, 3),
        RoemKind::SequenceFour => is_run_of(&claim.cards, 4),
        RoemKind::Stuk => {
            claim.cards.len() == 2
                && claim.cards.contains(&Card::new(Rank::King, trump))
                && claim.cards.contains(&Card::new(Rank::Queen, trump))
        }
        RoemKind::FourOfAKind => {
            claim.cards.len() == 4
                && QUAD_RANKS.contains(&claim.cards[0].rank)
                && claim.cards.iter().all(|c| c.rank == claim.cards[0].rank)
            // ranks equal + cards distinct implies all four suits present
        }
    }
}

fn is_run_of(cards: &[Card], len: usize) -> bool {
    if cards.len() != len {
        return false;
    }
    let suit = cards[0].suit;
    if cards.iter().any(|c| c.suit != suit) {
        return false;
    }
    let mut positions: Vec<u8> = cards.iter().map(|c| c.rank.sequence_position()).collect();
    positions.sort_unstable();
    positions.windows(2).all(|w| w[1] == w[0] + 1)
}
