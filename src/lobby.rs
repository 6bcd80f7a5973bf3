use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::Seat;
use crate::sync::GameDocument;

/// Length of a generated lobby code.
const CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LobbyStatus {
    Waiting,
    Playing,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub connected: bool,
}

/// Root document for one table: seats, status and the game itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lobby {
    pub code: String,
    pub host: Seat,
    pub created_at: DateTime<Utc>,
    pub status: LobbyStatus,
    /// One slot per seat, in seat order.
    pub players: [Option<PlayerInfo>; 4],
    pub game: Option<GameDocument>,
}

impl Lobby {
    /// Creates a waiting lobby with a random code; the host takes seat 0.
    pub fn new(host_name: &str) -> Self {
        Self::with_code(generate_code(&mut rand::rng()), host_name)
    }

    pub fn with_code(code: String, host_name: &str) -> Self {
        let mut players: [Option<PlayerInfo>; 4] = Default::default();
        players[0] = Some(PlayerInfo {
            name: host_name.to_string(),
            connected: true,
        });
        Self {
            code,
            host: Seat::ALL[0],
            created_at: Utc::now(),
            status: LobbyStatus::Waiting,
            players,
            game: None,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.seat_count() == 4
    }

    /// Seats a player at the first free seat.
    pub fn join(&mut self, name: &str) -> Option<Seat> {
        let free = self.players.iter().position(|p| p.is_none())?;
        self.players[free] = Some(PlayerInfo {
            name: name.to_string(),
            connected: true,
        });
        Seat::new(free as u8)
    }

    pub fn leave(&mut self, seat: Seat) {
        self.players[seat.index()] = None;
    }

    pub fn player(&self, seat: Seat) -> Option<&PlayerInfo> {
        self.players[seat.index()].as_ref()
    }
}

fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    // Unambiguous uppercase alphabet, no O/0 or I/1 confusion.
    const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
