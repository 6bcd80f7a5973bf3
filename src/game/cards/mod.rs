// Public API
pub use basic::{Card, Rank, Suit};
pub use deck::{deal, shuffled, HAND_SIZE, SEAT_COUNT};

// Internal modules
mod basic;
mod deck;
