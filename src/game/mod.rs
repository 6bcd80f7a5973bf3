// Public API
pub use cards::{Card, Rank, Suit};
pub use self::core::{Game, GameAction, GameResult, GameScores, Notification, Phase, TOTAL_ROUNDS};
pub use roem::{detect_all_roem, validate_roem_claim, RoemClaim, RoemDetection, RoemKind};
pub use round::{CompletedTrick, Round, RoundScores, TeamTotals, TrickPlay, VerzaaktOffense};
pub use rules::{legal_moves, trick_winner};
pub use scoring::{majority_threshold, round_result, trick_points, RoundInput, RoundOutcome};
pub use seat::{Seat, Team};

// Internal modules
pub mod cards;
pub mod core;
pub mod roem;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod seat;
