//! A Klaverjas engine with a sync layer for shared-document play.
//!
//! The `game` module is the pure rules engine: Rotterdam legal-move
//! enforcement, roem, scoring and the phase state machine. The `store`
//! and `sync` modules wrap it for four clients playing against one
//! replicated lobby document.

pub mod game;
pub mod lobby;
pub mod shared;
pub mod store;
pub mod sync;

pub use game::{Game, GameAction, Phase, Seat, Team};
pub use shared::GameError;
pub use store::{DocumentStore, InMemoryDocumentStore};
pub use sync::{GameDocument, GameSync};
