use std::fmt;

/// One of the four fixed positions at the table, numbered clockwise.
///
/// Seats 0 and 2 always partner as [`Team::NorthSouth`], seats 1 and 3 as
/// [`Team::EastWest`]; the partnership never changes during a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Seat(u8);

impl Seat {
    pub const ALL: [Seat; 4] = [Seat(0), Seat(1), Seat(2), Seat(3)];

    pub fn new(index: u8) -> Option<Seat> {
        (index < 4).then_some(Seat(index))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat immediately clockwise of this one.
    pub fn next(self) -> Seat {
        Seat((self.0 + 1) % 4)
    }

    pub fn team(self) -> Team {
        if self.0 % 2 == 0 {
            Team::NorthSouth
        } else {
            Team::EastWest
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Seat {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Seat::new(value).ok_or_else(|| format!("seat index out of range: {}", value))
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> u8 {
        seat.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Team {
    #[serde(rename = "ns")]
    NorthSouth,
    #[serde(rename = "we")]
    EastWest,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::NorthSouth => write!(f, "ns"),
            Team::EastWest => write!(f, "we"),
        }
    }
}
