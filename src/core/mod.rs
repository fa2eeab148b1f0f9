//! Core types: cards, seats, deterministic RNG.

pub mod card;
pub mod rng;
pub mod seat;

pub use card::{Card, CardId, Rank, Suit};
pub use rng::{GameRng, GameRngState};
pub use seat::{DrawSource, InvalidDrawSource, Seat};
