//! Seat identification and draw sources.
//!
//! A rummy table seats exactly two participants: the human player and the
//! automated opponent. Turn order alternates strictly between them.

use serde::{Deserialize, Serialize};

/// A seat at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Player,
    Bot,
}

impl Seat {
    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Seat {
        match self {
            Seat::Player => Seat::Bot,
            Seat::Bot => Seat::Player,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Player => write!(f, "player"),
            Seat::Bot => write!(f, "bot"),
        }
    }
}

/// Which pile a draw comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawSource {
    /// The face-down stock.
    Closed,
    /// The face-up discard pile.
    Open,
}

impl std::fmt::Display for DrawSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawSource::Closed => write!(f, "closed"),
            DrawSource::Open => write!(f, "open"),
        }
    }
}

/// Parse failure for a draw source string; the transport layer maps this to
/// `GameError::InvalidDrawSource`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidDrawSource;

impl std::str::FromStr for DrawSource {
    type Err = InvalidDrawSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" => Ok(DrawSource::Closed),
            "open" => Ok(DrawSource::Open),
            _ => Err(InvalidDrawSource),
        }
    }
}
