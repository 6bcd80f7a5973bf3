//! The authoritative phase state machine over rounds and tricks.
//!
//! Every public operation is a synchronous, total transition: it either
//! fully applies in memory or returns a `GameError` leaving the state
//! untouched. The sync adapter clones the document state into a `Game`,
//! applies one action and writes the whole result back, so nothing here
//! performs I/O.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::cards::{self, Card, Suit};
use crate::game::roem;
use crate::game::round::{CompletedTrick, Round, TrickPlay, VerzaaktOffense, TRICKS_PER_ROUND};
use crate::game::rules;
use crate::game::scoring::{self, RoundInput, RoundOutcome, VerzaaktBy};
use crate::game::seat::{Seat, Team};
use crate::shared::GameError;

/// A match runs a fixed sixteen rounds.
pub const TOTAL_ROUNDS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    TrumpSelection,
    Playing,
    /// Fourth card has landed; the trick stays on the table until the
    /// winner leads (or `complete_trick` runs) so clients can show it.
    TrickEnd,
    RoundEnd,
    GameEnd,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScores {
    pub ns: u32,
    pub we: u32,
}

impl GameScores {
    pub fn team(&self, team: Team) -> u32 {
        match team {
            Team::NorthSouth => self.ns,
            Team::EastWest => self.we,
        }
    }

    fn team_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::NorthSouth => &mut self.ns,
            Team::EastWest => &mut self.we,
        }
    }
}

/// Expected negative outcomes of normal play. These are written to the
/// document for clients to display; they are never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    RoemClaimed { seat: Seat, points: u32 },
    RoemRejected { seat: Seat },
    VerzaaktFound {
        caller: Seat,
        offense: VerzaaktOffense,
        guilty_team: Team,
    },
    VerzaaktNotFound { caller: Seat },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Winner(Team),
    Tie,
}

/// One client-submitted action against the shared game document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAction {
    ChooseTrump { seat: Seat, suit: Suit },
    PlayCard { seat: Seat, card: Card },
    ClaimRoem { seat: Seat },
    CallVerzaakt { seat: Seat },
    CompleteTrick,
    StartNextRound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub phase: Phase,
    /// 1-based round counter, up to [`TOTAL_ROUNDS`].
    pub round_number: u32,
    pub dealer: Seat,
    pub round: Option<Round>,
    pub game_scores: GameScores,
    pub last_round_outcome: Option<RoundOutcome>,
    pub last_notification: Option<Notification>,
}

impl Game {
    /// Deals round one with seat 0 as the first dealer.
    pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, GameError> {
        let dealer = Seat::ALL[0];
        Ok(Self {
            phase: Phase::TrumpSelection,
            round_number: 1,
            dealer,
            round: Some(Self::deal_round(rng, dealer)?),
            game_scores: GameScores::default(),
            last_round_outcome: None,
            last_notification: None,
        })
    }

    /// A game with predetermined hands, for deterministic setups.
    pub fn with_hands(hands: [Vec<Card>; 4], dealer: Seat) -> Self {
        Self {
            phase: Phase::TrumpSelection,
            round_number: 1,
            dealer,
            round: Some(Round::new(hands, dealer)),
            game_scores: GameScores::default(),
            last_round_outcome: None,
            last_notification: None,
        }
    }

    fn deal_round<R: Rng + ?Sized>(rng: &mut R, dealer: Seat) -> Result<Round, GameError> {
        let deck = cards::shuffled(&Card::all_cards(), rng);
        debug_assert_eq!(deck.len(), 32);
        Ok(Round::new(cards::deal(&deck)?, dealer))
    }

    pub fn current_player(&self) -> Option<Seat> {
        self.round.as_ref().map(|r| r.current_player)
    }

    /// Final result once the sixteenth round has been settled.
    pub fn result(&self) -> Option<GameResult> {
        if self.phase != Phase::GameEnd {
            return None;
        }
        Some(match self.game_scores.ns.cmp(&self.game_scores.we) {
            std::cmp::Ordering::Greater => GameResult::Winner(Team::NorthSouth),
            std::cmp::Ordering::Less => GameResult::Winner(Team::EastWest),
            std::cmp::Ordering::Equal => GameResult::Tie,
        })
    }

    /// Dispatches one submitted action to its transition.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        action: GameAction,
        rng: &mut R,
    ) -> Result<(), GameError> {
        match action {
            GameAction::ChooseTrump { seat, suit } => self.choose_trump(seat, suit),
            GameAction::PlayCard { seat, card } => self.play_card(seat, card),
            GameAction::ClaimRoem { seat } => self.claim_roem(seat),
            GameAction::CallVerzaakt { seat } => self.call_verzaakt(seat),
            GameAction::CompleteTrick => self.complete_trick(),
            GameAction::StartNextRound => self.start_next_round(rng),
        }
    }

    /// The seat left of the dealer picks trump and leads the first trick.
    pub fn choose_trump(&mut self, seat: Seat, suit: Suit) -> Result<(), GameError> {
        if self.phase != Phase::TrumpSelection {
            return Err(GameError::WrongPhase(self.phase));
        }
        let round = self.round.as_mut().ok_or(GameError::NoActiveRound)?;
        if seat != round.trump_chooser {
            return Err(GameError::NotYourTurn {
                seat,
                expected: round.trump_chooser,
            });
        }

        round.trump = Some(suit);
        round.playing_team = Some(seat.team());
        round.current_player = seat;
        round.hand_snapshots.push(round.hands.clone());
        self.phase = Phase::Playing;
        Ok(())
    }

    /// Plays a card into the current trick.
    ///
    /// In `TrickEnd`, the winner's lead doubles as finalization of the
    /// trick on the table: pending roem is committed, the trick archived
    /// and a fresh snapshot taken before the card is played.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        match self.phase {
            Phase::Playing => {}
            Phase::TrickEnd => {
                let round = self.round.as_ref().ok_or(GameError::NoActiveRound)?;
                if seat != round.current_player {
                    return Err(GameError::NotYourTurn {
                        seat,
                        expected: round.current_player,
                    });
                }
                if round.completed_tricks.len() == TRICKS_PER_ROUND - 1 {
                    // Eighth trick: there is nothing left to lead; the round
                    // settles via complete_trick instead.
                    return Err(GameError::WrongPhase(self.phase));
                }
                // Finalization archives the trick on the table, so the lead
                // must be known to be in hand before it runs.
                if !round.hands[seat.index()].contains(&card) {
                    return Err(GameError::CardNotInHand(card));
                }
                self.finalize_trick();
            }
            other => return Err(GameError::WrongPhase(other)),
        }

        let round = self.round.as_mut().ok_or(GameError::NoActiveRound)?;
        let trump = round.trump.ok_or(GameError::WrongPhase(Phase::TrumpSelection))?;
        if seat != round.current_player {
            return Err(GameError::NotYourTurn {
                seat,
                expected: round.current_player,
            });
        }

        let hand = &round.hands[seat.index()];
        let Some(position) = hand.iter().position(|&c| c == card) else {
            return Err(GameError::CardNotInHand(card));
        };
        if !rules::legal_moves(hand, &round.current_trick, trump).contains(&card) {
            return Err(GameError::IllegalMove(card));
        }

        round.hands[seat.index()].remove(position);
        round.current_trick.push(TrickPlay { seat, card });

        if round.current_trick.len() == 4 {
            let winner = rules::trick_winner(&round.current_trick, trump)?;
            round.current_player = winner;
            self.phase = Phase::TrickEnd;
        } else {
            round.current_player = seat.next();
        }
        Ok(())
    }

    /// Records a roem claim for the trick on the table.
    ///
    /// The value is auto-detected from the trick's cards and held pending
    /// until the trick winner is certain. A worthless claim produces a
    /// rejection notification, not an error.
    pub fn claim_roem(&mut self, seat: Seat) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::Playing | Phase::TrickEnd) {
            return Err(GameError::WrongPhase(self.phase));
        }
        let round = self.round.as_mut().ok_or(GameError::NoActiveRound)?;
        let trump = round.trump.ok_or(GameError::WrongPhase(Phase::TrumpSelection))?;
        if round.current_trick.is_empty() || round.roem_claimed {
            return Err(GameError::InvalidRoemClaim);
        }

        let cards: Vec<Card> = round.current_trick.iter().map(|p| p.card).collect();
        let detection = roem::detect_all_roem(&cards, trump);
        if detection.total == 0 {
            self.last_notification = Some(Notification::RoemRejected { seat });
            return Ok(());
        }

        round.roem_claimed = true;
        round.pending_roem = detection.total;
        self.last_notification = Some(Notification::RoemClaimed {
            seat,
            points: detection.total,
        });
        Ok(())
    }

    /// Challenges the round for a hidden illegal move.
    ///
    /// Needs at least two cards on the table (a lone lead can never be
    /// provably illegal). A proven offense ends the round immediately in
    /// the guilty team's disfavor; an unproven call only notifies.
    pub fn call_verzaakt(&mut self, caller: Seat) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::Playing | Phase::TrickEnd) {
            return Err(GameError::WrongPhase(self.phase));
        }
        let round = self.round.as_ref().ok_or(GameError::NoActiveRound)?;
        if round.current_trick.len() < 2 {
            return Err(GameError::InsufficientPriorPlay);
        }

        match round.find_verzaakt() {
            None => {
                self.last_notification = Some(Notification::VerzaaktNotFound { caller });
                Ok(())
            }
            Some(offense) => {
                let guilty_team = offense.seat.team();
                // Pending roem is forfeited with the rest of the trick-level
                // accounting; only committed roem survives into settlement.
                self.settle_round(Some(guilty_team));
                self.phase = Phase::RoundEnd;
                self.last_notification = Some(Notification::VerzaaktFound {
                    caller,
                    offense,
                    guilty_team,
                });
                Ok(())
            }
        }
    }

    /// Finalizes a completed trick without waiting for the winner's lead.
    ///
    /// Safe to invoke any number of times: outside `TrickEnd` it is a
    /// no-op, which is what makes retried submissions harmless.
    pub fn complete_trick(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::TrickEnd {
            return Ok(());
        }
        self.finalize_trick();
        Ok(())
    }

    /// Deals the next round, rotating the dealer clockwise; after the last
    /// round the game ends instead. No-op outside `RoundEnd`.
    pub fn start_next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.phase != Phase::RoundEnd {
            return Ok(());
        }
        if self.round_number >= TOTAL_ROUNDS {
            self.phase = Phase::GameEnd;
            self.round = None;
            return Ok(());
        }

        self.round_number += 1;
        self.dealer = self.dealer.next();
        self.round = Some(Self::deal_round(rng, self.dealer)?);
        self.phase = Phase::TrumpSelection;
        Ok(())
    }

    /// Commits the trick on the table: points and pending roem go to the
    /// winner's team, the trick is archived, and either the next trick
    /// opens (fresh snapshot) or the round settles.
    fn finalize_trick(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let Some(trump) = round.trump else {
            return;
        };
        if round.current_trick.len() != 4 {
            return;
        }

        let winner = round.current_player;
        let trick_cards: Vec<Card> = round.current_trick.iter().map(|p| p.card).collect();
        let is_last = round.completed_tricks.len() == TRICKS_PER_ROUND - 1;

        let mut points = scoring::trick_points(&trick_cards, trump);
        if is_last {
            points += scoring::LAST_TRICK_BONUS;
        }

        let totals = round.scores.team_mut(winner.team());
        totals.base += points;
        totals.roem += round.pending_roem;

        let roem = round.pending_roem;
        round.completed_tricks.push(CompletedTrick {
            plays: std::mem::take(&mut round.current_trick),
            winner,
            roem,
        });
        round.pending_roem = 0;
        round.roem_claimed = false;

        if is_last {
            self.settle_round(None);
            self.phase = Phase::RoundEnd;
        } else {
            round.hand_snapshots.push(round.hands.clone());
            self.phase = Phase::Playing;
        }
    }

    /// Converts the round's accumulators into final team scores and adds
    /// them to the game totals.
    fn settle_round(&mut self, verzaakt_guilty: Option<Team>) {
        let Some(round) = self.round.as_ref() else {
            return;
        };
        let Some(playing) = round.playing_team else {
            return;
        };
        let defending = playing.opponent();

        let outcome = scoring::round_result(RoundInput {
            playing_points: round.scores.team(playing).base,
            defending_points: round.scores.team(defending).base,
            playing_roem: round.scores.team(playing).roem,
            defending_roem: round.scores.team(defending).roem,
            playing_tricks: round.tricks_won_by(playing),
            verzaakt: verzaakt_guilty.map(|team| {
                if team == playing {
                    VerzaaktBy::PlayingTeam
                } else {
                    VerzaaktBy::DefendingTeam
                }
            }),
        });

        *self.game_scores.team_mut(playing) += outcome.playing_score;
        *self.game_scores.team_mut(defending) += outcome.defending_score;
        self.last_round_outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::{Rank, Rank::*, Suit::*};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// One suit per seat; seat 1 chooses trump and holds all hearts.
    fn suit_per_seat_game() -> Game {
        let hands = [
            suit_hand(Spades),
            suit_hand(Hearts),
            suit_hand(Clubs),
            suit_hand(Diamonds),
        ];
        Game::with_hands(hands, Seat::ALL[0])
    }

    fn suit_hand(suit: Suit) -> Vec<Card> {
        use strum::IntoEnumIterator;
        Rank::iter().map(|r| Card::new(r, suit)).collect()
    }

    #[test]
    fn test_new_game_deals_and_awaits_trump() {
        let game = Game::new_game(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(game.phase, Phase::TrumpSelection);
        assert_eq!(game.round_number, 1);

        let round = game.round.as_ref().unwrap();
        assert_eq!(round.trump_chooser, game.dealer.next());
        assert_eq!(round.current_player, round.trump_chooser);
        for seat in Seat::ALL {
            assert_eq!(round.hand(seat).len(), 8);
        }
    }

    #[test]
    fn test_choose_trump_rejects_wrong_seat_and_phase() {
        let mut game = suit_per_seat_game();
        assert!(matches!(
            game.choose_trump(Seat::ALL[0], Hearts),
            Err(GameError::NotYourTurn { .. })
        ));

        game.choose_trump(Seat::ALL[1], Hearts).unwrap();
        assert_eq!(game.phase, Phase::Playing);
        assert_eq!(
            game.choose_trump(Seat::ALL[1], Spades),
            Err(GameError::WrongPhase(Phase::Playing))
        );
    }

    #[test]
    fn test_chooser_team_becomes_playing_team_and_leads() {
        let mut game = suit_per_seat_game();
        game.choose_trump(Seat::ALL[1], Hearts).unwrap();

        let round = game.round.as_ref().unwrap();
        assert_eq!(round.playing_team, Some(Team::EastWest));
        assert_eq!(round.current_player, Seat::ALL[1]);
        assert_eq!(round.hand_snapshots.len(), 1);
    }

    #[test]
    fn test_play_card_guards() {
        let mut game = suit_per_seat_game();
        game.choose_trump(Seat::ALL[1], Hearts).unwrap();

        // Out of turn.
        assert!(matches!(
            game.play_card(Seat::ALL[0], card(Ace, Spades)),
            Err(GameError::NotYourTurn { .. })
        ));
        // Not in hand: seat 1 holds only hearts.
        assert_eq!(
            game.play_card(Seat::ALL[1], card(Ace, Spades)),
            Err(GameError::CardNotInHand(card(Ace, Spades)))
        );

        game.play_card(Seat::ALL[1], card(Seven, Hearts)).unwrap();
        // Seat 2 holds no hearts and no trump... hearts is trump; clubs only.
        // Must follow hearts is impossible; must trump is impossible; any
        // club is legal.
        game.play_card(Seat::ALL[2], card(Seven, Clubs)).unwrap();
        game.play_card(Seat::ALL[3], card(Seven, Diamonds)).unwrap();
        game.play_card(Seat::ALL[0], card(Seven, Spades)).unwrap();

        // Only the heart competes: seat 1 takes the trick.
        assert_eq!(game.phase, Phase::TrickEnd);
        assert_eq!(game.current_player(), Some(Seat::ALL[1]));
    }

    #[test]
    fn test_winner_lead_finalizes_previous_trick() {
        let mut game = suit_per_seat_game();
        game.choose_trump(Seat::ALL[1], Hearts).unwrap();
        game.play_card(Seat::ALL[1], card(Seven, Hearts)).unwrap();
        game.play_card(Seat::ALL[2], card(Seven, Clubs)).unwrap();
        game.play_card(Seat::ALL[3], card(Seven, Diamonds)).unwrap();
        game.play_card(Seat::ALL[0], card(Seven, Spades)).unwrap();
        assert_eq!(game.phase, Phase::TrickEnd);

        // Another seat cannot lead the next trick.
        assert!(matches!(
            game.play_card(Seat::ALL[2], card(Eight, Clubs)),
            Err(GameError::NotYourTurn { .. })
        ));

        game.play_card(Seat::ALL[1], card(Eight, Hearts)).unwrap();
        assert_eq!(game.phase, Phase::Playing);

        let round = game.round.as_ref().unwrap();
        assert_eq!(round.completed_tricks.len(), 1);
        assert_eq!(round.completed_tricks[0].winner, Seat::ALL[1]);
        assert_eq!(round.current_trick.len(), 1);
        assert_eq!(round.hand_snapshots.len(), 2);
    }

    #[test]
    fn test_rejected_trick_end_lead_leaves_state_unchanged() {
        let mut game = suit_per_seat_game();
        game.choose_trump(Seat::ALL[1], Hearts).unwrap();
        game.play_card(Seat::ALL[1], card(Seven, Hearts)).unwrap();
        game.play_card(Seat::ALL[2], card(Seven, Clubs)).unwrap();
        game.play_card(Seat::ALL[3], card(Seven, Diamonds)).unwrap();
        game.play_card(Seat::ALL[0], card(Seven, Spades)).unwrap();
        assert_eq!(game.phase, Phase::TrickEnd);

        // The winner leads a card it does not hold: the trick on the table
        // must not be finalized by the failed attempt.
        let before = game.clone();
        assert_eq!(
            game.play_card(Seat::ALL[1], card(Ace, Spades)),
            Err(GameError::CardNotInHand(card(Ace, Spades)))
        );
        assert_eq!(game, before);

        // A legal lead afterwards still works.
        game.play_card(Seat::ALL[1], card(Eight, Hearts)).unwrap();
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn test_complete_trick_is_idempotent() {
        let mut game = suit_per_seat_game();
        game.choose_trump(Seat::ALL[1], Hearts).unwrap();
        game.play_card(Seat::ALL[1], card(Seven, Hearts)).unwrap();
        game.play_card(Seat::ALL[2], card(Seven, Clubs)).unwrap();
        game.play_card(Seat::ALL[3], card(Seven, Diamonds)).unwrap();
        game.play_card(Seat::ALL[0], card(Seven, Spades)).unwrap();

        game.complete_trick().unwrap();
        let after_first = game.clone();
        game.complete_trick().unwrap();
        assert_eq!(game, after_first);
    }

    #[test]
    fn test_worthless_roem_claim_notifies_instead_of_failing() {
        let mut game = suit_per_seat_game();
        game.choose_trump(Seat::ALL[1], Hearts).unwrap();
        game.play_card(Seat::ALL[1], card(Queen, Hearts)).unwrap();
        game.play_card(Seat::ALL[2], card(Seven, Clubs)).unwrap();
        game.play_card(Seat::ALL[3], card(Seven, Diamonds)).unwrap();

        // No roem in Q-7-7.
        game.claim_roem(Seat::ALL[1]).unwrap();
        assert_eq!(
            game.last_notification,
            Some(Notification::RoemRejected { seat: Seat::ALL[1] })
        );

        // A worthless claim does not consume the trick's claim slot.
        let round = game.round.as_ref().unwrap();
        assert!(!round.roem_claimed);
        assert_eq!(round.pending_roem, 0);
    }

    #[test]
    fn test_pending_roem_awarded_at_finalization() {
        // Build a trick that itself contains a 3-run so the claim sticks.
        let hands = [
            vec![card(Seven, Spades), card(Ace, Diamonds)],
            vec![card(Eight, Spades), card(Seven, Clubs)],
            vec![card(Nine, Spades), card(Eight, Clubs)],
            vec![card(Ten, Diamonds), card(Nine, Clubs)],
        ];
        let mut game = Game::with_hands(hands, Seat::ALL[3]);
        game.choose_trump(Seat::ALL[0], Diamonds).unwrap();

        game.play_card(Seat::ALL[0], card(Seven, Spades)).unwrap();
        game.play_card(Seat::ALL[1], card(Eight, Spades)).unwrap();
        game.play_card(Seat::ALL[2], card(Nine, Spades)).unwrap();
        game.play_card(Seat::ALL[3], card(Ten, Diamonds)).unwrap();
        assert_eq!(game.phase, Phase::TrickEnd);

        // 7-8-9 of spades on the table: 20 points, pending.
        game.claim_roem(Seat::ALL[2]).unwrap();
        assert_eq!(
            game.last_notification,
            Some(Notification::RoemClaimed {
                seat: Seat::ALL[2],
                points: 20
            })
        );
        // One claim slot per trick.
        assert_eq!(
            game.claim_roem(Seat::ALL[0]),
            Err(GameError::InvalidRoemClaim)
        );

        // Seat 3 trumped and wins; roem lands with east-west on finalize.
        game.complete_trick().unwrap();
        let round = game.round.as_ref().unwrap();
        assert_eq!(round.scores.we.roem, 20);
        assert_eq!(round.completed_tricks[0].roem, 20);
        assert_eq!(round.pending_roem, 0);
        assert!(!round.roem_claimed);
    }

    #[test]
    fn test_verzaakt_needs_two_cards() {
        let mut game = suit_per_seat_game();
        game.choose_trump(Seat::ALL[1], Hearts).unwrap();
        game.play_card(Seat::ALL[1], card(Seven, Hearts)).unwrap();
        assert_eq!(
            game.call_verzaakt(Seat::ALL[0]),
            Err(GameError::InsufficientPriorPlay)
        );
    }

    #[test]
    fn test_verzaakt_not_found_leaves_round_running() {
        let mut game = suit_per_seat_game();
        game.choose_trump(Seat::ALL[1], Hearts).unwrap();
        game.play_card(Seat::ALL[1], card(Seven, Hearts)).unwrap();
        game.play_card(Seat::ALL[2], card(Seven, Clubs)).unwrap();

        game.call_verzaakt(Seat::ALL[0]).unwrap();
        assert_eq!(game.phase, Phase::Playing);
        assert_eq!(
            game.last_notification,
            Some(Notification::VerzaaktNotFound { caller: Seat::ALL[0] })
        );
    }

    #[test]
    fn test_start_next_round_is_idempotent_and_rotates_dealer() {
        let mut game = suit_per_seat_game();
        let mut rng = StdRng::seed_from_u64(5);

        // Not in RoundEnd: a stray retry must not deal a fresh round.
        let before = game.clone();
        game.start_next_round(&mut rng).unwrap();
        assert_eq!(game, before);

        game.phase = Phase::RoundEnd;
        game.start_next_round(&mut rng).unwrap();
        assert_eq!(game.phase, Phase::TrumpSelection);
        assert_eq!(game.round_number, 2);
        assert_eq!(game.dealer, Seat::ALL[1]);
        let round = game.round.as_ref().unwrap();
        assert_eq!(round.trump_chooser, Seat::ALL[2]);
    }

    #[test]
    fn test_game_ends_after_final_round() {
        let mut game = suit_per_seat_game();
        game.round_number = TOTAL_ROUNDS;
        game.phase = Phase::RoundEnd;
        game.game_scores = GameScores { ns: 1400, we: 1200 };

        game.start_next_round(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(game.phase, Phase::GameEnd);
        assert!(game.round.is_none());
        assert_eq!(game.result(), Some(GameResult::Winner(Team::NorthSouth)));

        // Terminal: further round starts change nothing.
        let terminal = game.clone();
        game.start_next_round(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(game, terminal);
    }

    #[test]
    fn test_tie_is_reported() {
        let mut game = suit_per_seat_game();
        game.phase = Phase::GameEnd;
        game.round = None;
        game.game_scores = GameScores { ns: 800, we: 800 };
        assert_eq!(game.result(), Some(GameResult::Tie));
    }
}
